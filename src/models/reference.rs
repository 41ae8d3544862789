use super::Language;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Disease {
    pub id: &'static str,
    pub name: &'static str,
    pub name_hindi: &'static str,
    pub symptoms: &'static [&'static str],
    pub treatment: &'static [&'static str],
    pub prevention: &'static [&'static str],
    /// Catalog crop ids
    pub affected_crops: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pest {
    pub id: &'static str,
    pub name: &'static str,
    pub name_hindi: &'static str,
    pub description: &'static str,
    pub damage: &'static [&'static str],
    pub control: &'static [&'static str],
    /// Catalog crop ids
    pub affected_crops: &'static [&'static str],
}

/// Government support programme shown in the financial advisory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialScheme {
    pub id: &'static str,
    pub name: &'static str,
    pub name_hindi: &'static str,
    pub description: &'static str,
    pub eligibility: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub application_steps: &'static [&'static str],
    pub contact: &'static str,
}

fn localized(language: Language, name: &'static str, name_hindi: &'static str) -> &'static str {
    match language {
        Language::Hi => name_hindi,
        _ => name,
    }
}

impl Disease {
    pub fn affects(&self, crop_id: &str) -> bool {
        self.affected_crops
            .iter()
            .any(|c| c.eq_ignore_ascii_case(crop_id))
    }

    pub fn display_name(&self, language: Language) -> &'static str {
        localized(language, self.name, self.name_hindi)
    }
}

impl Pest {
    pub fn affects(&self, crop_id: &str) -> bool {
        self.affected_crops
            .iter()
            .any(|c| c.eq_ignore_ascii_case(crop_id))
    }

    pub fn display_name(&self, language: Language) -> &'static str {
        localized(language, self.name, self.name_hindi)
    }
}

impl FinancialScheme {
    pub fn display_name(&self, language: Language) -> &'static str {
        localized(language, self.name, self.name_hindi)
    }
}
