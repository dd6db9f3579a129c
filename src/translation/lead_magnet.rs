use crate::frontmatter::Frontmatter;
use crate::i18n::Language;
use std::collections::HashMap;

/// Approved lead-magnet copy for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadMagnetCopy {
    pub title: String,
    pub description: String,
}

/// Per-locale lead-magnet copy that replaces whatever the source article
/// carries. The copy is marketing-approved, so it is never machine translated.
#[derive(Debug, Clone)]
pub struct LeadMagnetOverrides {
    entries: HashMap<Language, LeadMagnetCopy>,
}

impl Default for LeadMagnetOverrides {
    /// One entry per translation target, taken from the locale strings.
    fn default() -> Self {
        Language::translation_targets()
            .into_iter()
            .fold(Self::empty(), |table, lang| {
                let strings = &lang.config().strings;
                table.with_entry(
                    lang,
                    strings.lead_magnet_title,
                    strings.lead_magnet_description,
                )
            })
    }
}

impl LeadMagnetOverrides {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn with_entry(
        mut self,
        lang: Language,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.entries.insert(
            lang,
            LeadMagnetCopy {
                title: title.into(),
                description: description.into(),
            },
        );
        self
    }

    pub fn get(&self, lang: Language) -> Option<&LeadMagnetCopy> {
        self.entries.get(&lang)
    }

    /// Overwrite `leadMagnet.title` and `leadMagnet.description` when the
    /// document has a lead magnet and the table has copy for `lang`.
    /// Other lead-magnet fields are left alone.
    pub fn apply(&self, metadata: &mut Frontmatter, lang: Language) {
        let (Some(lead_magnet), Some(copy)) = (metadata.lead_magnet.as_mut(), self.get(lang))
        else {
            return;
        };
        lead_magnet.title = Some(copy.title.clone());
        lead_magnet.description = Some(copy.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::LeadMagnet;
    use serde_yaml::Value;

    fn with_lead_magnet() -> Frontmatter {
        let mut lead_magnet = LeadMagnet {
            title: Some("Guida Completa".into()),
            description: Some("Scarica la guida".into()),
            ..Default::default()
        };
        lead_magnet.extra.insert(
            Value::String("downloadUrl".into()),
            Value::String("/downloads/guide.pdf".into()),
        );
        Frontmatter {
            lead_magnet: Some(lead_magnet),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_table_covers_translation_targets() {
        let table = LeadMagnetOverrides::default();

        for lang in Language::translation_targets() {
            assert!(table.get(lang).is_some(), "missing copy for {}", lang);
        }
        assert!(table.get(Language::ITALIAN).is_none());
    }

    #[test]
    fn test_apply_replaces_copy_and_keeps_other_fields() {
        let mut metadata = with_lead_magnet();
        LeadMagnetOverrides::default().apply(&mut metadata, Language::ENGLISH);

        let lead_magnet = metadata.lead_magnet.expect("lead magnet");
        assert_eq!(
            lead_magnet.title.as_deref(),
            Some("Complete Guide: How to Start a Business in Italy as a Foreigner")
        );
        assert!(lead_magnet
            .description
            .as_deref()
            .unwrap()
            .starts_with("Get the complete PDF guide"));
        assert_eq!(lead_magnet.extra.len(), 1);
    }

    #[test]
    fn test_apply_without_entry_is_noop() {
        let mut metadata = with_lead_magnet();
        LeadMagnetOverrides::empty().apply(&mut metadata, Language::FRENCH);

        assert_eq!(metadata, with_lead_magnet());
    }

    #[test]
    fn test_apply_without_lead_magnet_adds_nothing() {
        let mut metadata = Frontmatter::default();
        LeadMagnetOverrides::default().apply(&mut metadata, Language::SPANISH);

        assert!(metadata.lead_magnet.is_none());
    }
}
