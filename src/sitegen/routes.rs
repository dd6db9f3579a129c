use crate::i18n::{Language, LanguageStrings};

/// Top-level pages every locale has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Services,
    About,
    Blog,
    Contact,
    Media,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Services,
        Section::About,
        Section::Blog,
        Section::Contact,
        Section::Media,
    ];

    /// Path suffix after the locale prefix; empty for the home page.
    pub fn path(self) -> &'static str {
        match self {
            Section::Home => "",
            Section::Services => "/services",
            Section::About => "/about",
            Section::Blog => "/blog",
            Section::Contact => "/contact",
            Section::Media => "/media",
        }
    }

    pub fn title(self, strings: &LanguageStrings) -> &'static str {
        match self {
            Section::Home => strings.home_title,
            Section::Services => strings.services_title,
            Section::About => strings.about_title,
            Section::Blog => strings.blog_title,
            Section::Contact => strings.contact_title,
            Section::Media => strings.media_title,
        }
    }

    pub fn description(self, strings: &LanguageStrings) -> &'static str {
        match self {
            Section::Home => strings.home_description,
            Section::Services => strings.services_description,
            Section::About => strings.about_description,
            Section::Blog => strings.blog_description,
            Section::Contact => strings.contact_description,
            Section::Media => strings.media_description,
        }
    }

    pub fn changefreq(self) -> &'static str {
        match self {
            Section::Home => "weekly",
            Section::Blog => "daily",
            _ => "monthly",
        }
    }

    pub fn priority(self) -> &'static str {
        match self {
            Section::Home => "1.0",
            Section::Blog => "0.9",
            Section::Services => "0.8",
            _ => "0.7",
        }
    }
}

/// One localized base page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub lang: Language,
    pub section: Section,
}

impl Route {
    /// `/{lang}{section}`, e.g. `/en/services`.
    pub fn path(&self) -> String {
        localized_path(self.lang, self.section.path())
    }

    /// Output directory relative to the dist root, e.g. `en/services`.
    pub fn output_dir(&self) -> String {
        format!("{}{}", self.lang.code(), self.section.path())
    }
}

pub fn localized_path(lang: Language, suffix: &str) -> String {
    format!("/{}{}", lang.code(), suffix)
}

/// Every (locale, section) pair, locale-major in registry order.
pub fn all_routes() -> Vec<Route> {
    Language::all()
        .into_iter()
        .flat_map(|lang| {
            Section::ALL
                .into_iter()
                .map(move |section| Route { lang, section })
        })
        .collect()
}
