/// Trivia categories offered by the quiz screen, keyed by the service's
/// numeric category ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    GeneralKnowledge,
    ComputerScience,
    Sports,
    History,
    ScienceAndNature,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::GeneralKnowledge,
        Category::ComputerScience,
        Category::Sports,
        Category::History,
        Category::ScienceAndNature,
    ];

    pub fn id(&self) -> u32 {
        match self {
            Self::GeneralKnowledge => 9,
            Self::ComputerScience => 18,
            Self::Sports => 21,
            Self::History => 23,
            Self::ScienceAndNature => 17,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralKnowledge => "General Knowledge",
            Self::ComputerScience => "Computer Science",
            Self::Sports => "Sports",
            Self::History => "History",
            Self::ScienceAndNature => "Science & Nature",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "general" | "general-knowledge" => Some(Self::GeneralKnowledge),
            "cs" | "computer-science" => Some(Self::ComputerScience),
            "sports" => Some(Self::Sports),
            "history" => Some(Self::History),
            "science" | "science-and-nature" => Some(Self::ScienceAndNature),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

/// One multiple-choice question, answers already decoded and shuffled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub correct: String,
    pub answers: Vec<String>,
}

/// Decode the fixed set of HTML character entities the trivia service
/// emits in question and answer text. `&amp;` goes last so entity names
/// produced by its decoding are not decoded again.
pub fn decode_entities(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&rsquo;", "\u{2019}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_ids_match_the_service() {
        assert_eq!(Category::GeneralKnowledge.id(), 9);
        assert_eq!(Category::ComputerScience.id(), 18);
        assert_eq!(Category::Sports.id(), 21);
        assert_eq!(Category::History.id(), 23);
        assert_eq!(Category::ScienceAndNature.id(), 17);
    }

    #[test]
    fn decodes_the_fixed_entity_set() {
        assert_eq!(
            decode_entities("&quot;Hello&quot; &amp; welcome, it&#039;s here"),
            "\"Hello\" & welcome, it's here"
        );
        assert_eq!(decode_entities("1 &lt; 2 &gt; 0"), "1 < 2 > 0");
        assert_eq!(decode_entities("won&rsquo;t"), "won\u{2019}t");
    }

    #[test]
    fn double_encoded_ampersands_decode_once() {
        assert_eq!(decode_entities("&amp;quot;"), "&quot;");
    }
}
