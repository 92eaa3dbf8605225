//! Offline analysis used when no hosted provider answers.
//!
//! Pure and total: every question and roster, the empty roster included,
//! yields a non-empty answer. Template choice is an ordered rule table and the
//! first rule whose predicate holds renders the answer.

use std::fmt::Write as _;

use crate::classify::{self, Category, Technology, SENIORITY_LEVELS};
use crate::roster::Professional;
use crate::stats::{RosterStats, Tally};

/// Names at most this many professionals in a seniority listing
pub const LISTING_CAP: usize = 10;

const COUNT_KEYWORDS: &[&str] = &["quantos", "quantas", "how many"];

/// Answer template picked for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    BlankQuestion,
    NoData,
    TechnologyCount,
    SeniorityListing,
    GeneralStatistics,
}

struct Query<'a> {
    question: &'a str,
    lowered: String,
    roster: &'a [Professional],
    stats: RosterStats,
    technologies: Vec<&'static Technology>,
    level: Option<&'static Category>,
}

impl<'a> Query<'a> {
    fn new(question: &'a str, roster: &'a [Professional]) -> Self {
        let question = question.trim();
        let lowered = question.to_lowercase();
        Self {
            question,
            technologies: classify::technologies_named_in(&lowered),
            level: SENIORITY_LEVELS.named_in(&lowered),
            lowered,
            roster,
            stats: RosterStats::compute(roster),
        }
    }
}

struct Rule {
    template: Template,
    applies: fn(&Query<'_>) -> bool,
    render: fn(&Query<'_>) -> String,
}

static RULES: &[Rule] = &[
    Rule {
        template: Template::BlankQuestion,
        applies: is_blank_question,
        render: render_blank_question,
    },
    Rule {
        template: Template::NoData,
        applies: is_empty_roster,
        render: render_no_data,
    },
    Rule {
        template: Template::TechnologyCount,
        applies: asks_technology_count,
        render: render_technology_count,
    },
    Rule {
        template: Template::SeniorityListing,
        applies: names_seniority_level,
        render: render_seniority_listing,
    },
    Rule {
        template: Template::GeneralStatistics,
        applies: always,
        render: render_general_statistics,
    },
];

/// Answer a question from the roster alone
pub fn summarize(question: &str, roster: &[Professional]) -> String {
    let query = Query::new(question, roster);
    match RULES.iter().find(|rule| (rule.applies)(&query)) {
        Some(rule) => {
            tracing::debug!(template = ?rule.template, "Offline template selected");
            (rule.render)(&query)
        }
        None => render_general_statistics(&query),
    }
}

/// Template `summarize` would render for this input
pub fn select_template(question: &str, roster: &[Professional]) -> Template {
    let query = Query::new(question, roster);
    RULES
        .iter()
        .find(|rule| (rule.applies)(&query))
        .map(|rule| rule.template)
        .unwrap_or(Template::GeneralStatistics)
}

/// Full statistics report, independent of any question
pub fn overview(roster: &[Professional]) -> String {
    let query = Query::new("", roster);
    if is_empty_roster(&query) {
        render_no_data(&query)
    } else {
        render_general_statistics(&query)
    }
}

fn is_blank_question(query: &Query<'_>) -> bool {
    query.question.is_empty()
}

fn is_empty_roster(query: &Query<'_>) -> bool {
    query.stats.total == 0
}

fn asks_technology_count(query: &Query<'_>) -> bool {
    !query.technologies.is_empty()
        && COUNT_KEYWORDS
            .iter()
            .any(|keyword| query.lowered.contains(keyword))
}

fn names_seniority_level(query: &Query<'_>) -> bool {
    query.level.is_some()
}

fn always(_: &Query<'_>) -> bool {
    true
}

fn header(query: &Query<'_>) -> String {
    // Only the overview renders without a question
    if query.question.is_empty() {
        return "🔍 Análise Offline Inteligente\n\nVisão geral da equipe\n".to_string();
    }
    format!(
        "🔍 Análise Offline Inteligente\n\nPergunta: \"{}\"\n",
        query.question
    )
}

fn share(stats: &RosterStats, count: usize) -> String {
    match stats.percent(count) {
        Some(pct) => format!("{count} ({pct}%)"),
        None => count.to_string(),
    }
}

fn headline_label(tally: Option<&Tally>) -> String {
    match tally {
        Some(t) => format!("{} ({} profissionais)", t.label, t.count),
        None => "não disponível".to_string(),
    }
}

fn technology_line(stats: &RosterStats, technology: &Technology) -> String {
    let count = stats
        .technology(technology.column)
        .map(|t| t.count)
        .unwrap_or(0);
    match stats.percent(count) {
        Some(pct) => format!("{}: {count} profissionais ({pct}%)", technology.label),
        None => format!("{}: {count} profissionais", technology.label),
    }
}

fn general_lines(stats: &RosterStats, out: &mut String) {
    for contract in &stats.contracts {
        let _ = writeln!(
            out,
            "• Colaboradores {}: {}",
            contract.label,
            share(stats, contract.count)
        );
    }
    let _ = writeln!(
        out,
        "• Tecnologia mais comum: {}",
        headline_label(stats.headline_technology())
    );
    let _ = writeln!(
        out,
        "• Senioridade predominante: {}",
        headline_label(stats.headline_seniority())
    );
}

fn render_blank_question(_: &Query<'_>) -> String {
    "⚠️ Dados insuficientes\n\n\
     Nenhuma pergunta foi informada. Pergunte, por exemplo, \
     \"Quantos profissionais sabem React?\" ou \"Quais profissionais são sêniores?\"."
        .to_string()
}

fn render_no_data(query: &Query<'_>) -> String {
    format!(
        "{}\n⚠️ Sem dados: nenhum profissional cadastrado para análise.\n\
         Importe ou cadastre profissionais e pergunte novamente.",
        header(query)
    )
}

fn render_technology_count(query: &Query<'_>) -> String {
    let stats = &query.stats;
    let mut out = header(query);
    let _ = writeln!(out, "\n📊 Dados da equipe ({} profissionais):\n", stats.total);
    for technology in &query.technologies {
        let _ = writeln!(out, "{}", technology_line(stats, technology));
    }
    out.push_str("\n📈 Estatísticas Gerais:\n");
    general_lines(stats, &mut out);
    out.trim_end().to_string()
}

fn render_seniority_listing(query: &Query<'_>) -> String {
    let stats = &query.stats;
    let mut out = header(query);
    let Some(level) = query.level else {
        return render_general_statistics(query);
    };

    let members = SENIORITY_LEVELS.members(query.roster, level);
    let _ = writeln!(
        out,
        "\n👥 Profissionais {}: {} de {}\n",
        level.label,
        share(stats, members.len()),
        stats.total
    );

    if members.is_empty() {
        let _ = writeln!(out, "Nenhum profissional classificado como {}.", level.label);
    }
    for professional in members.iter().take(LISTING_CAP) {
        match professional.area_atuacao.as_deref().filter(|a| !a.trim().is_empty()) {
            Some(area) => {
                let _ = writeln!(out, "• {} ({})", professional.display_name(), area);
            }
            None => {
                let _ = writeln!(out, "• {}", professional.display_name());
            }
        }
    }
    if members.len() > LISTING_CAP {
        let _ = writeln!(
            out,
            "• ... e mais {} profissionais",
            members.len() - LISTING_CAP
        );
    }

    out.push_str("\n📈 Estatísticas Gerais:\n");
    general_lines(stats, &mut out);
    out.trim_end().to_string()
}

fn render_general_statistics(query: &Query<'_>) -> String {
    let stats = &query.stats;
    let mut out = header(query);
    let _ = writeln!(out, "\n📊 Dados Analisados: {} profissionais", stats.total);

    out.push_str("\n📈 Estatísticas Principais:\n");
    general_lines(stats, &mut out);

    out.push_str("\n🎯 Distribuição de Senioridade:\n");
    for level in &stats.seniority {
        let _ = writeln!(out, "• {}: {}", level.label, share(stats, level.count));
    }

    if !query.question.is_empty() {
        out.push_str("\n🔍 Insights Baseados na Pergunta:\n");
        if query.technologies.is_empty() {
            out.push_str("• Análise geral dos dados disponíveis\n");
        }
        for technology in &query.technologies {
            let _ = writeln!(out, "• {}", technology_line(stats, technology));
        }
    }

    out.push_str("\n🛠️ Stack Tecnológico:\n");
    let mut any = false;
    for tally in stats.technologies.iter().filter(|t| t.count > 0) {
        any = true;
        let _ = writeln!(out, "• {}: {} profissionais", tally.label, tally.count);
    }
    if !any {
        out.push_str("• Nenhuma tecnologia registrada\n");
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn roster(records: Value) -> Vec<Professional> {
        serde_json::from_value(records).unwrap()
    }

    fn ten_with_four_react() -> Vec<Professional> {
        let records: Vec<Value> = (0..10)
            .map(|i| {
                json!({
                    "nome_completo": format!("Profissional {i}"),
                    "regime": if i % 2 == 0 { "CLT" } else { "PJ" },
                    "proficiencia_cargo": "Pleno",
                    "react": if i < 4 { "Pleno" } else { "Sem conhecimento" },
                })
            })
            .collect();
        roster(Value::Array(records))
    }

    #[test]
    fn test_react_count_reports_count_and_percentage() {
        let question = "Quantos profissionais sabem React?";
        let answer = summarize(question, &ten_with_four_react());

        assert_eq!(
            select_template(question, &ten_with_four_react()),
            Template::TechnologyCount
        );
        assert!(answer.contains("React: 4 profissionais (40%)"), "{answer}");
        assert!(answer.contains("Colaboradores CLT: 5 (50%)"));
    }

    #[test]
    fn test_cpp_count_does_not_report_c() {
        let people = roster(json!([
            {"nome_completo": "Ana", "linguagem_cpp": "Pleno", "linguagem_c": "Sem conhecimento"},
            {"nome_completo": "Bia", "linguagem_cpp": "Sênior", "linguagem_c": "Pleno"},
        ]));
        let answer = summarize("Quantos sabem Linguagem C++?", &people);

        assert!(answer.contains("Linguagem C++: 2 profissionais (100%)"), "{answer}");
        assert!(!answer.contains("Linguagem C:"), "{answer}");
    }

    #[test]
    fn test_overview_has_no_question_line() {
        let answer = overview(&ten_with_four_react());

        assert!(answer.contains("Visão geral da equipe"));
        assert!(!answer.contains("Pergunta:"), "{answer}");
        assert!(!answer.contains("Insights Baseados na Pergunta"));
        assert!(answer.contains("📊 Dados Analisados: 10 profissionais"));
        assert!(answer.contains("• React: 4 profissionais"));

        let empty = overview(&[]);
        assert!(empty.contains("Sem dados"));
        assert!(!empty.contains("Pergunta:"));
    }

    #[test]
    fn test_empty_roster_has_no_ratios() {
        for question in ["Quantos sabem Java?", "Quais são sêniores?", "Resumo"] {
            let answer = summarize(question, &[]);
            assert_eq!(select_template(question, &[]), Template::NoData);
            assert!(answer.contains("Sem dados"));
            assert!(!answer.contains('%'), "{answer}");
        }
    }

    #[test]
    fn test_blank_question_is_insufficient_data() {
        let answer = summarize("   ", &ten_with_four_react());
        assert!(answer.starts_with("⚠️ Dados insuficientes"));
        assert!(!answer.contains('%'));
        assert_eq!(summarize("", &[]), answer);
    }

    #[test]
    fn test_count_needs_a_named_technology() {
        let people = ten_with_four_react();
        assert_eq!(
            select_template("Quantos profissionais temos?", &people),
            Template::GeneralStatistics
        );
        // "java" is not mistaken for "javascript"
        let answer = summarize("Quantos sabem JavaScript?", &people);
        assert!(answer.contains("JavaScript: 0 profissionais (0%)"));
        assert!(!answer.contains("\nJava: "));
    }

    #[test]
    fn test_count_rule_precedes_seniority_rule() {
        let people = ten_with_four_react();
        assert_eq!(
            select_template("Quantos seniores sabem React?", &people),
            Template::TechnologyCount
        );
    }

    #[test]
    fn test_seniority_listing_caps_names() {
        let records: Vec<Value> = (0..13)
            .map(|i| json!({"nome_completo": format!("Dev {i:02}"), "proficiencia_cargo": "Senior", "area_atuacao": "Backend"}))
            .collect();
        let people = roster(Value::Array(records));
        let answer = summarize("Quais profissionais são sêniores?", &people);

        assert!(answer.contains("Profissionais Sênior: 13 (100%) de 13"));
        assert!(answer.contains("• Dev 00 (Backend)"));
        assert!(answer.contains("• Dev 09 (Backend)"));
        assert!(!answer.contains("Dev 10"));
        assert!(answer.contains("e mais 3 profissionais"));
    }

    #[test]
    fn test_seniority_listing_keeps_literal_matching() {
        let people = roster(json!([
            {"nome_completo": "Ana", "proficiencia_cargo": "Sênior"},
            {"nome_completo": "Bia", "proficiencia_cargo": "senior"},
        ]));
        let answer = summarize("Quem é sênior?", &people);
        assert!(answer.contains("• Bia"));
        assert!(!answer.contains("• Ana"));
    }

    #[test]
    fn test_seniority_listing_with_empty_bucket() {
        let people = roster(json!([{"nome_completo": "Caio", "proficiencia_cargo": "Pleno"}]));
        let answer = summarize("Temos juniores?", &people);
        assert!(answer.contains("Nenhum profissional classificado como Júnior."));
    }

    #[test]
    fn test_general_statistics_without_any_skills() {
        let people = roster(json!([{"nome_completo": "Davi"}]));
        let answer = summarize("Resumo da equipe", &people);
        assert!(answer.contains("Tecnologia mais comum: não disponível"));
        assert!(answer.contains("Senioridade predominante: não disponível"));
        assert!(answer.contains("Nenhuma tecnologia registrada"));
        assert!(answer.contains("Análise geral dos dados disponíveis"));
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let people = ten_with_four_react();
        let question = "Análise completa da equipe com foco em React";
        assert_eq!(summarize(question, &people), summarize(question, &people));
    }
}
