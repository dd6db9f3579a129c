/// Pre-authored copy for one locale.
///
/// Nothing in here goes through the translation service: page metadata is
/// written by hand for each locale and the lead-magnet copy is the approved
/// marketing text for the downloadable guide.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Page Metadata ====================
    /// `<title>` of the home page
    pub home_title: &'static str,
    /// Meta description of the home page
    pub home_description: &'static str,

    pub services_title: &'static str,
    pub services_description: &'static str,

    pub about_title: &'static str,
    pub about_description: &'static str,

    pub blog_title: &'static str,
    pub blog_description: &'static str,

    pub contact_title: &'static str,
    pub contact_description: &'static str,

    pub media_title: &'static str,
    pub media_description: &'static str,

    // ==================== Lead Magnet ====================
    /// Title of the business guide offered at the end of articles
    pub lead_magnet_title: &'static str,

    /// Description of the business guide offered at the end of articles
    pub lead_magnet_description: &'static str,
}

pub const ITALIAN_STRINGS: LanguageStrings = LanguageStrings {
    home_title: "Commercialista per Stranieri in Italia | Apertura Società e Partita IVA",
    home_description: "Commercialista specializzato per stranieri in Italia. Apertura società, partita IVA, regime forfettario. Consulenza fiscale in inglese. Preventivo gratuito in 24h.",
    services_title: "Servizi per Imprese e Professionisti Stranieri | Yourbusinessinitaly.com",
    services_description: "Costituzione società, apertura partita IVA, contabilità e consulenza fiscale per stranieri che vogliono lavorare in Italia.",
    about_title: "Chi Siamo | Yourbusinessinitaly.com",
    about_description: "Un team di commercialisti che accompagna imprenditori e professionisti stranieri in ogni fase della loro attività in Italia.",
    blog_title: "Blog: Fisco e Impresa in Italia per Stranieri | Yourbusinessinitaly.com",
    blog_description: "Guide pratiche su tasse, partita IVA, società e residenza fiscale in Italia, scritte da commercialisti.",
    contact_title: "Contatti | Yourbusinessinitaly.com",
    contact_description: "Richiedi una consulenza: rispondiamo entro 24 ore con un preventivo gratuito.",
    media_title: "Parlano di Noi - Yourbusinessinitaly.com",
    media_description: "Scopri cosa dicono di Yourbusinessinitaly.com la stampa e i media specializzati nel settore economico-finanziario.",
    lead_magnet_title: "Guida Completa: Come Aprire un'Attività in Italia da Straniero",
    lead_magnet_description: "Ricevi la guida PDF completa con tutti i dettagli, documenti necessari e procedure step-by-step per aprire la tua attività in Italia.",
};

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    home_title: "Accountant for Foreigners in Italy | Company Formation and VAT Number",
    home_description: "Accounting firm specialised in foreigners in Italy. Company formation, VAT number, flat-rate regime. Tax advice in English. Free quote within 24h.",
    services_title: "Services for Foreign Businesses and Professionals | Yourbusinessinitaly.com",
    services_description: "Company formation, VAT registration, bookkeeping and tax advice for foreigners who want to work in Italy.",
    about_title: "About Us | Yourbusinessinitaly.com",
    about_description: "A team of accountants supporting foreign entrepreneurs and professionals at every stage of their business in Italy.",
    blog_title: "Blog: Tax and Business in Italy for Foreigners | Yourbusinessinitaly.com",
    blog_description: "Practical guides on taxes, VAT numbers, companies and tax residency in Italy, written by accountants.",
    contact_title: "Contact | Yourbusinessinitaly.com",
    contact_description: "Request a consultation: we reply within 24 hours with a free quote.",
    media_title: "Media Coverage - Yourbusinessinitaly.com",
    media_description: "See what the press and financial media say about Yourbusinessinitaly.com.",
    lead_magnet_title: "Complete Guide: How to Start a Business in Italy as a Foreigner",
    lead_magnet_description: "Get the complete PDF guide with all details, required documents and step-by-step procedures to start your business in Italy.",
};

pub const GERMAN_STRINGS: LanguageStrings = LanguageStrings {
    home_title: "Steuerberater für Ausländer in Italien | Firmengründung und Umsatzsteuernummer",
    home_description: "Steuerkanzlei für Ausländer in Italien. Firmengründung, Umsatzsteuernummer, Pauschalregelung. Steuerberatung auf Englisch. Kostenloses Angebot in 24h.",
    services_title: "Leistungen für ausländische Unternehmen und Selbständige | Yourbusinessinitaly.com",
    services_description: "Firmengründung, Umsatzsteuerregistrierung, Buchhaltung und Steuerberatung für Ausländer, die in Italien arbeiten möchten.",
    about_title: "Über Uns | Yourbusinessinitaly.com",
    about_description: "Ein Team von Steuerberatern, das ausländische Unternehmer in jeder Phase ihrer Tätigkeit in Italien begleitet.",
    blog_title: "Blog: Steuern und Unternehmen in Italien für Ausländer | Yourbusinessinitaly.com",
    blog_description: "Praktische Leitfäden zu Steuern, Umsatzsteuernummer, Gesellschaften und steuerlichem Wohnsitz in Italien.",
    contact_title: "Kontakt | Yourbusinessinitaly.com",
    contact_description: "Fordern Sie eine Beratung an: Wir antworten innerhalb von 24 Stunden mit einem kostenlosen Angebot.",
    media_title: "Presse - Yourbusinessinitaly.com",
    media_description: "Was Presse und Finanzmedien über Yourbusinessinitaly.com berichten.",
    lead_magnet_title: "Vollständiger Leitfaden: Wie man als Ausländer ein Unternehmen in Italien gründet",
    lead_magnet_description: "Erhalten Sie den vollständigen PDF-Leitfaden mit allen Details, erforderlichen Dokumenten und Schritt-für-Schritt-Verfahren zur Unternehmensgründung in Italien.",
};

pub const FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    home_title: "Expert-Comptable pour Étrangers en Italie | Création de Société et Numéro de TVA",
    home_description: "Cabinet comptable spécialisé pour les étrangers en Italie. Création de société, numéro de TVA, régime forfaitaire. Devis gratuit en 24h.",
    services_title: "Services pour Entreprises et Professionnels Étrangers | Yourbusinessinitaly.com",
    services_description: "Création de société, immatriculation TVA, comptabilité et conseil fiscal pour les étrangers qui souhaitent travailler en Italie.",
    about_title: "Qui Sommes-Nous | Yourbusinessinitaly.com",
    about_description: "Une équipe d'experts-comptables qui accompagne les entrepreneurs étrangers à chaque étape de leur activité en Italie.",
    blog_title: "Blog : Fiscalité et Entreprise en Italie pour Étrangers | Yourbusinessinitaly.com",
    blog_description: "Guides pratiques sur les impôts, la TVA, les sociétés et la résidence fiscale en Italie.",
    contact_title: "Contact | Yourbusinessinitaly.com",
    contact_description: "Demandez une consultation : nous répondons sous 24 heures avec un devis gratuit.",
    media_title: "Ils Parlent de Nous - Yourbusinessinitaly.com",
    media_description: "Découvrez ce que la presse et les médias financiers disent de Yourbusinessinitaly.com.",
    lead_magnet_title: "Guide Complet: Comment Créer une Entreprise en Italie en tant qu'Étranger",
    lead_magnet_description: "Recevez le guide PDF complet avec tous les détails, documents requis et procédures étape par étape pour créer votre entreprise en Italie.",
};

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    home_title: "Asesor Fiscal para Extranjeros en Italia | Apertura de Sociedad y Número de IVA",
    home_description: "Asesoría especializada en extranjeros en Italia. Apertura de sociedades, número de IVA, régimen simplificado. Presupuesto gratuito en 24h.",
    services_title: "Servicios para Empresas y Profesionales Extranjeros | Yourbusinessinitaly.com",
    services_description: "Constitución de sociedades, alta de IVA, contabilidad y asesoría fiscal para extranjeros que quieren trabajar en Italia.",
    about_title: "Quiénes Somos | Yourbusinessinitaly.com",
    about_description: "Un equipo de asesores que acompaña a emprendedores extranjeros en cada fase de su actividad en Italia.",
    blog_title: "Blog: Impuestos y Empresa en Italia para Extranjeros | Yourbusinessinitaly.com",
    blog_description: "Guías prácticas sobre impuestos, número de IVA, sociedades y residencia fiscal en Italia.",
    contact_title: "Contacto | Yourbusinessinitaly.com",
    contact_description: "Solicita una consulta: respondemos en 24 horas con un presupuesto gratuito.",
    media_title: "Hablan de Nosotros - Yourbusinessinitaly.com",
    media_description: "Descubre lo que dicen la prensa y los medios financieros sobre Yourbusinessinitaly.com.",
    lead_magnet_title: "Guía Completa: Cómo Abrir un Negocio en Italia como Extranjero",
    lead_magnet_description: "Recibe la guía PDF completa con todos los detalles, documentos necesarios y procedimientos paso a paso para abrir tu negocio en Italia.",
};

#[cfg(test)]
mod tests {
    use super::*;

    fn all_strings() -> [(&'static str, LanguageStrings); 5] {
        [
            ("it", ITALIAN_STRINGS),
            ("en", ENGLISH_STRINGS),
            ("de", GERMAN_STRINGS),
            ("fr", FRENCH_STRINGS),
            ("es", SPANISH_STRINGS),
        ]
    }

    #[test]
    fn test_no_page_copy_is_empty() {
        for (code, s) in all_strings() {
            for value in [
                s.home_title,
                s.home_description,
                s.services_title,
                s.services_description,
                s.about_title,
                s.about_description,
                s.blog_title,
                s.blog_description,
                s.contact_title,
                s.contact_description,
                s.media_title,
                s.media_description,
            ] {
                assert!(!value.trim().is_empty(), "empty page copy for {}", code);
            }
        }
    }

    #[test]
    fn test_lead_magnet_copy_is_distinct_per_locale() {
        let titles: Vec<_> = all_strings()
            .iter()
            .map(|(_, s)| s.lead_magnet_title)
            .collect();
        for (i, title) in titles.iter().enumerate() {
            assert!(!title.is_empty());
            assert_eq!(titles.iter().filter(|t| *t == title).count(), 1, "{}", i);
        }
    }

    #[test]
    fn test_english_lead_magnet_copy() {
        assert_eq!(
            ENGLISH_STRINGS.lead_magnet_title,
            "Complete Guide: How to Start a Business in Italy as a Foreigner"
        );
        assert!(ENGLISH_STRINGS
            .lead_magnet_description
            .starts_with("Get the complete PDF guide"));
    }
}
