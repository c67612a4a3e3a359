//! Interface strings for both languages.

use crate::language::Language;

/// Per-language interface labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    pub essays: &'static str,
    pub persona: &'static str,
    pub search_placeholder: &'static str,
    pub search_shortcut: &'static str,
    pub no_results: &'static str,
    pub wisdom_button: &'static str,
    pub return_label: &'static str,
    pub fragments_title: &'static str,
    pub intro_text: &'static str,
    pub branding: &'static str,
    pub private_signal: &'static str,
    pub back_to_top: &'static str,
    pub motto: &'static str,
    pub end_of_transmission: &'static str,
}

const EN: UiStrings = UiStrings {
    essays: "Essays",
    persona: "Persona",
    search_placeholder: "Search fragments...",
    search_shortcut: "Press Ctrl+K to search",
    no_results: "No fragments found in the void.",
    wisdom_button: "Seek Wisdom",
    return_label: "Return",
    fragments_title: "Fragments of silence in a world of code.",
    intro_text: "A digital sanctuary for engineering philosophy and timeless reflections.",
    branding: "Branding",
    private_signal: "Private Signal",
    back_to_top: "Back to Top",
    motto: "Engineering is the alchemy of our age.",
    end_of_transmission: "End of transmission",
};

const KH: UiStrings = UiStrings {
    essays: "អត្ថបទ",
    persona: "អំពីខ្ញុំ",
    search_placeholder: "ស្វែងរក...",
    search_shortcut: "ចុច Ctrl+K ដើម្បីស្វែងរក",
    no_results: "មិនមានលទ្ធផលនៅក្នុងភាពទទេឡើយ។",
    wisdom_button: "ស្វែងរកប្រាជ្ញា",
    return_label: "ត្រឡប់ក្រោយ",
    fragments_title: "បំណែកនៃភាពស្ងប់ស្ងាត់ក្នុងលោកនៃកូដ។",
    intro_text: "ទីសក្ការៈឌីជីថលសម្រាប់ទស្សនវិជ្ជាវិស្វកម្ម និងការឆ្លុះបញ្ចាំងមិនចេះរីងស្ងួត។",
    branding: "ម៉ាកយីហោ",
    private_signal: "ទំនាក់ទំនងឯកជន",
    back_to_top: "ទៅកាន់ផ្នែកខាងលើ",
    motto: "វិស្វកម្មគឺជាអាល់ឃីមីនៃយុគសម័យរបស់យើង។",
    end_of_transmission: "បញ្ចប់ការផ្សាយ",
};

impl UiStrings {
    pub fn for_language(language: Language) -> &'static UiStrings {
        match language {
            Language::En => &EN,
            Language::Kh => &KH,
        }
    }
}

/// Author name shown on the persona page.
pub const AUTHOR_NAME: &str = "Meng Navid.";

/// Brand line shown in the footer.
pub const FOOTER: &str = "Coderistic - A Digital Sanctuary";

/// Placeholder shown above the wisdom control before anything is requested.
pub const WISDOM_PROMPT: &str = "A fragment of contemplation...";

/// Label shown on the wisdom control while a request is outstanding.
pub const WISDOM_CONSULTING: &str = "Consulting...";

/// Attribution line under a received aphorism.
pub const WISDOM_ATTRIBUTION: &str = "- The Sage's Reflection";
