//! Professional records as read from the registry backend.
//!
//! The resolver only ever borrows a roster snapshot; nothing here mutates it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RosterError;

/// Skill value meaning the professional explicitly has no knowledge of the technology
pub const NO_KNOWLEDGE: &str = "Sem conhecimento";

/// Legacy boolean-style flags are read the same way as the sentinel
const NO_KNOWLEDGE_ALIASES: &[&str] = &["sem conhecimento", "false"];

/// One professional record
///
/// The labelled text fields are named; every other column (skill markers,
/// timestamps, ids) is kept verbatim in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub nome_completo: Option<String>,
    pub email: Option<String>,
    pub area_atuacao: Option<String>,
    pub skill_principal: Option<String>,
    pub nivel_experiencia: Option<String>,
    pub proficiencia_cargo: Option<String>,
    pub regime: Option<String>,
    pub local_alocacao: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// Tri-state skill column value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillMarker {
    /// Missing, null or blank
    Absent,
    /// The sentinel value
    NoKnowledge,
    /// Any other label, e.g. "Pleno" or "true"
    Proficiency(String),
}

impl SkillMarker {
    fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::Absent;
        }
        let lowered = trimmed.to_lowercase();
        if NO_KNOWLEDGE_ALIASES.contains(&lowered.as_str()) {
            Self::NoKnowledge
        } else {
            Self::Proficiency(trimmed.to_string())
        }
    }

    /// Whether this marker counts the technology as present
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Proficiency(_))
    }
}

impl Professional {
    /// Text value of a named column, whether declared or flattened
    pub fn text(&self, field: &str) -> Option<&str> {
        let declared = match field {
            "nome_completo" => Some(&self.nome_completo),
            "email" => Some(&self.email),
            "area_atuacao" => Some(&self.area_atuacao),
            "skill_principal" => Some(&self.skill_principal),
            "nivel_experiencia" => Some(&self.nivel_experiencia),
            "proficiencia_cargo" => Some(&self.proficiencia_cargo),
            "regime" => Some(&self.regime),
            "local_alocacao" => Some(&self.local_alocacao),
            _ => None,
        };

        match declared {
            Some(value) => value.as_deref(),
            None => self.fields.get(field).and_then(Value::as_str),
        }
    }

    /// Marker stored in a skill column
    pub fn skill(&self, column: &str) -> SkillMarker {
        match self.fields.get(column) {
            None | Some(Value::Null) => SkillMarker::Absent,
            Some(Value::String(text)) => SkillMarker::from_text(text),
            Some(Value::Bool(true)) => SkillMarker::Proficiency("true".to_string()),
            Some(Value::Bool(false)) => SkillMarker::NoKnowledge,
            Some(Value::Number(n)) => SkillMarker::Proficiency(n.to_string()),
            Some(_) => SkillMarker::Absent,
        }
    }

    /// Whether the professional has the technology stored in `column`
    pub fn has_skill(&self, column: &str) -> bool {
        self.skill(column).is_present()
    }

    /// Name for listings, falling back to the e-mail
    pub fn display_name(&self) -> &str {
        self.nome_completo
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.email.as_deref().filter(|e| !e.trim().is_empty()))
            .unwrap_or("N/A")
    }
}

/// Parse a roster from a JSON array of records
pub fn parse_roster(json: &str) -> Result<Vec<Professional>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load a roster file exported from the registry
pub fn load_roster(path: &Path) -> Result<Vec<Professional>, RosterError> {
    let content = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let roster = parse_roster(&content).map_err(|source| RosterError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), records = roster.len(), "Roster loaded");
    Ok(roster)
}
