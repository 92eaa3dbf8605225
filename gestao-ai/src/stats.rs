//! Aggregate counts over a roster snapshot.

use crate::classify::{CONTRACT_TYPES, SENIORITY_LEVELS, TECHNOLOGIES};
use crate::roster::Professional;

/// Count for one category or technology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
}

/// Contract, seniority and technology distribution of a roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStats {
    pub total: usize,
    pub contracts: Vec<Tally>,
    pub seniority: Vec<Tally>,
    pub technologies: Vec<Tally>,
}

impl RosterStats {
    pub fn compute(roster: &[Professional]) -> Self {
        let contracts = CONTRACT_TYPES
            .tally(roster)
            .into_iter()
            .map(|(category, count)| Tally {
                key: category.key,
                label: category.label,
                count,
            })
            .collect();

        let seniority = SENIORITY_LEVELS
            .tally(roster)
            .into_iter()
            .map(|(category, count)| Tally {
                key: category.key,
                label: category.label,
                count,
            })
            .collect();

        let technologies = TECHNOLOGIES
            .iter()
            .map(|technology| Tally {
                key: technology.column,
                label: technology.label,
                count: roster
                    .iter()
                    .filter(|p| p.has_skill(technology.column))
                    .count(),
            })
            .collect();

        Self {
            total: roster.len(),
            contracts,
            seniority,
            technologies,
        }
    }

    /// Best-represented technology, `None` if nobody has any
    pub fn headline_technology(&self) -> Option<&Tally> {
        headline(&self.technologies)
    }

    /// Best-represented seniority level, `None` if nobody is classified
    pub fn headline_seniority(&self) -> Option<&Tally> {
        headline(&self.seniority)
    }

    pub fn technology(&self, column: &str) -> Option<&Tally> {
        self.technologies.iter().find(|t| t.key == column)
    }

    pub fn contract(&self, key: &str) -> Option<&Tally> {
        self.contracts.iter().find(|t| t.key == key)
    }

    /// Rounded share of the roster, `None` for an empty roster
    pub fn percent(&self, count: usize) -> Option<usize> {
        percent(count, self.total)
    }
}

/// Highest count; ties go to the first entry, all-zero yields `None`
pub fn headline(tallies: &[Tally]) -> Option<&Tally> {
    tallies.iter().fold(None, |best: Option<&Tally>, tally| {
        if tally.count == 0 {
            return best;
        }
        match best {
            Some(current) if current.count >= tally.count => Some(current),
            _ => Some(tally),
        }
    })
}

/// `count / total` as a percentage rounded half up; never divides by zero
pub fn percent(count: usize, total: usize) -> Option<usize> {
    if total == 0 {
        return None;
    }
    Some((count * 200 + total) / (total * 2))
}
