//! Internationalization (i18n) support
//!
//! The front-end ships with a fixed set of locales. Each locale provides the
//! month abbreviations used by the date formatter and the handful of UI
//! labels rendered on the home page.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported display locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// English
    #[default]
    #[serde(rename = "en")]
    En,
    /// Brazilian Portuguese
    #[serde(rename = "pt-BR")]
    PtBr,
}

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

impl Locale {
    /// BCP 47 language tag, used for the `lang` attribute
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::PtBr => "pt-BR",
        }
    }

    /// Abbreviated month name for a 1-based month number
    pub fn month_abbrev(&self, month: u32) -> &'static str {
        let table = match self {
            Locale::En => &EN_MONTHS,
            Locale::PtBr => &PT_BR_MONTHS,
        };
        let index = (month.clamp(1, 12) - 1) as usize;
        table[index]
    }

    /// Word joining the date and the time ("15 Mar 2023 at 14:05")
    pub fn at_word(&self) -> &'static str {
        match self {
            Locale::En => "at",
            Locale::PtBr => "às",
        }
    }

    /// Label of the "load more" button
    pub fn load_more_label(&self) -> &'static str {
        match self {
            Locale::En => "Load more posts",
            Locale::PtBr => "Carregar mais posts",
        }
    }

    /// Label of the preview exit link
    pub fn exit_preview_label(&self) -> &'static str {
        match self {
            Locale::En => "Exit preview mode",
            Locale::PtBr => "Sair do modo Preview",
        }
    }

    /// Message shown when a "load more" request fails
    pub fn load_failed_label(&self) -> &'static str {
        match self {
            Locale::En => "Could not load more posts. Please try again.",
            Locale::PtBr => "Não foi possível carregar mais posts. Tente novamente.",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            "pt-br" | "pt" => Ok(Locale::PtBr),
            other => Err(format!("unsupported language: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_abbrev() {
        assert_eq!(Locale::En.month_abbrev(3), "Mar");
        assert_eq!(Locale::PtBr.month_abbrev(2), "fev");
        assert_eq!(Locale::En.month_abbrev(12), "Dec");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("pt_BR".parse::<Locale>().unwrap(), Locale::PtBr);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_from_yaml() {
        let locale: Locale = serde_yaml::from_str("pt-BR").unwrap();
        assert_eq!(locale, Locale::PtBr);
    }
}
