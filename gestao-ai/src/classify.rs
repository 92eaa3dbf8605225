//! Declarative classification tables.
//!
//! Each table names the columns it reads, in priority order, and an ordered
//! list of categories. A record lands in the first category whose needle
//! occurs in the first column that classifies it (case-insensitive, literal;
//! accents are not folded, so "Sênior" does not match the `senior` needle).

use crate::roster::Professional;

/// A named bucket and the predicate data that selects it
#[derive(Debug)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    /// Lower-case substrings matched against the record column
    pub needles: &'static [&'static str],
    /// Lower-case words that name this category in a question
    pub keywords: &'static [&'static str],
}

impl Category {
    /// Whether a column value falls into this category
    pub fn matches(&self, value: &str) -> bool {
        let lowered = value.to_lowercase();
        self.needles.iter().any(|needle| lowered.contains(needle))
    }

    /// Whether a lower-cased question names this category
    pub fn is_named_in(&self, lowered_question: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| mentions(lowered_question, keyword))
    }
}

/// Ordered categories over prioritized columns; first match wins
#[derive(Debug)]
pub struct CategoryTable {
    /// Columns consulted in order; later ones are fallbacks
    pub fields: &'static [&'static str],
    pub categories: &'static [Category],
}

impl CategoryTable {
    /// Category for one record, if any
    pub fn classify(&self, professional: &Professional) -> Option<&'static Category> {
        self.fields.iter().find_map(|field| {
            let value = professional.text(field)?;
            self.categories.iter().find(|category| category.matches(value))
        })
    }

    /// Records per category, in declared order
    pub fn tally(&self, roster: &[Professional]) -> Vec<(&'static Category, usize)> {
        let mut counts = vec![0usize; self.categories.len()];
        for professional in roster {
            if let Some(category) = self.classify(professional) {
                if let Some(index) = self
                    .categories
                    .iter()
                    .position(|c| std::ptr::eq(c, category))
                {
                    counts[index] += 1;
                }
            }
        }
        self.categories.iter().zip(counts).collect()
    }

    /// First category named by a lower-cased question
    pub fn named_in(&self, lowered_question: &str) -> Option<&'static Category> {
        self.categories
            .iter()
            .find(|category| category.is_named_in(lowered_question))
    }

    /// Records that fall into the given category, in roster order
    pub fn members<'a>(
        &self,
        roster: &'a [Professional],
        category: &Category,
    ) -> Vec<&'a Professional> {
        roster
            .iter()
            .filter(|p| self.classify(p).is_some_and(|c| std::ptr::eq(c, category)))
            .collect()
    }
}

/// Contract type over the `regime` column
pub static CONTRACT_TYPES: CategoryTable = CategoryTable {
    fields: &["regime"],
    categories: &[
        Category {
            key: "clt",
            label: "CLT",
            needles: &["clt"],
            keywords: &["clt"],
        },
        Category {
            key: "pj",
            label: "PJ",
            needles: &["pj"],
            keywords: &["pj"],
        },
    ],
};

/// Seniority over `proficiencia_cargo`, falling back to the legacy `senioridade` column
pub static SENIORITY_LEVELS: CategoryTable = CategoryTable {
    fields: &["proficiencia_cargo", "senioridade"],
    categories: &[
        Category {
            key: "junior",
            label: "Júnior",
            needles: &["junior"],
            keywords: &["junior", "júnior", "juniores", "júniores"],
        },
        Category {
            key: "pleno",
            label: "Pleno",
            needles: &["pleno"],
            keywords: &["pleno", "plenos"],
        },
        Category {
            key: "senior",
            label: "Sênior",
            needles: &["senior"],
            keywords: &["senior", "sênior", "seniores", "sêniores"],
        },
    ],
};

/// A technology tracked as a skill column
#[derive(Debug)]
pub struct Technology {
    pub column: &'static str,
    pub label: &'static str,
    /// Lower-case words that name the technology in a question
    pub keywords: &'static [&'static str],
}

impl Technology {
    /// Whether a lower-cased question names this technology
    pub fn is_named_in(&self, lowered_question: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| mentions(lowered_question, keyword))
    }
}

macro_rules! tech {
    ($column:literal, $label:literal, [$($keyword:literal),+ $(,)?]) => {
        Technology {
            column: $column,
            label: $label,
            keywords: &[$($keyword),+],
        }
    };
}

/// Skill columns in declared order; ties in headline statistics go to the earlier entry
pub static TECHNOLOGIES: &[Technology] = &[
    tech!("java", "Java", ["java"]),
    tech!("javascript", "JavaScript", ["javascript"]),
    tech!("python", "Python", ["python"]),
    tech!("typescript", "TypeScript", ["typescript"]),
    tech!("php", "PHP", ["php"]),
    tech!("dotnet", ".NET", [".net", "dotnet"]),
    tech!("react", "React", ["react"]),
    tech!("angular", "Angular", ["angular"]),
    tech!("ionic", "Ionic", ["ionic"]),
    tech!("flutter", "Flutter", ["flutter"]),
    tech!("mysql", "MySQL", ["mysql"]),
    tech!("postgres", "PostgreSQL", ["postgres", "postgresql"]),
    tech!("oracle_db", "Oracle", ["oracle"]),
    tech!("sql_server", "SQL Server", ["sql server", "sqlserver"]),
    tech!("mongodb", "MongoDB", ["mongodb", "mongo"]),
    tech!("aws", "AWS", ["aws"]),
    tech!("azure", "Azure", ["azure"]),
    tech!("gcp", "GCP", ["gcp"]),
    tech!("android", "Android", ["android"]),
    tech!("cobol", "Cobol", ["cobol"]),
    tech!("linguagem_r", "Linguagem R", ["linguagem r"]),
    tech!("linguagem_c", "Linguagem C", ["linguagem c"]),
    tech!("linguagem_cpp", "Linguagem C++", ["c++"]),
    tech!("windows", "Windows", ["windows"]),
    tech!("raspberry_pi", "Raspberry PI", ["raspberry"]),
    tech!("arduino", "Arduino", ["arduino"]),
    tech!(
        "gerencia_projetos",
        "Gerência de Projetos",
        ["gerência de projetos", "gerencia de projetos"]
    ),
    tech!(
        "administracao_projetos",
        "Administração de Projetos",
        ["administração de projetos", "administracao de projetos"]
    ),
    tech!(
        "analise_requisitos",
        "Análise de Requisitos",
        ["análise de requisitos", "analise de requisitos"]
    ),
];

/// Columns summarised as boolean-style flags in compact provider context
pub const COMPACT_SKILL_COLUMNS: &[&str] = &["java", "javascript", "python", "react", "typescript"];

/// Look a technology up by column name
pub fn technology(column: &str) -> Option<&'static Technology> {
    TECHNOLOGIES.iter().find(|t| t.column == column)
}

/// Technologies named in a lower-cased question, in declared order
pub fn technologies_named_in(lowered_question: &str) -> Vec<&'static Technology> {
    TECHNOLOGIES
        .iter()
        .filter(|t| t.is_named_in(lowered_question))
        .collect()
}

/// Substring search that only accepts matches on word boundaries.
///
/// Both inputs must already be lower-cased. "java" does not match inside
/// "javascript", but does match "java?" or "(java)". `+` and `#` count as
/// part of a word, so "linguagem c" does not match "linguagem c++".
pub fn mentions(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}
