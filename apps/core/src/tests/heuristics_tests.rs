//! Heuristics Tests
//!
//! Cross-cutting checks on the local, model-free pieces: score clamping,
//! reply repair, deception flags and crisis detection.

use crate::analysis::{clamp, parse_model_output, CrisisDetector, DeceptionFlagger, FlagCategory};
use serde_json::json;

#[cfg(test)]
mod clamp_tests {
    use super::*;

    #[test]
    fn test_integer_like_strings_match_integers() {
        for v in -150_i64..=250 {
            let expected = v.clamp(0, 100) as u8;
            assert_eq!(clamp(&json!(v)), expected, "clamp({})", v);
            assert_eq!(clamp(&json!(v.to_string())), expected, "clamp(\"{}\")", v);
        }
    }

    #[test]
    fn test_non_numeric_inputs() {
        let inputs = vec![
            json!(null),
            json!("very high"),
            json!("N/A"),
            json!(""),
            json!(["80"]),
            json!({"value": 80}),
        ];
        for input in inputs {
            assert_eq!(clamp(&input), 0, "Expected 0 for {}", input);
        }
    }
}

#[cfg(test)]
mod repair_tests {
    use super::*;

    const OBJECT: &str = r#"{"mood_analysis": "Calm", "quote": "Breathe."}"#;

    #[test]
    fn test_recovers_from_common_wrappings() {
        let wrappings = vec![
            OBJECT.to_string(),
            format!("```json\n{}\n```", OBJECT),
            format!("```\n{}\n```", OBJECT),
            format!("Sure, here you go: {}", OBJECT),
            format!("{}\n\nI hope this helps.", OBJECT),
            format!("Analysis:\n```json\n{}\n```\nStay well!", OBJECT),
        ];

        for raw in wrappings {
            let value = parse_model_output(&raw).unwrap_or_else(|e| panic!("Failed on {:?}: {}", raw, e));
            assert_eq!(value["mood_analysis"], "Calm", "Wrong object for {:?}", raw);
        }
    }

    #[test]
    fn test_prose_fails() {
        let replies = vec!["", "I can't help with that.", "Mood: calm. Quote: breathe."];
        for raw in replies {
            assert!(parse_model_output(raw).is_err(), "Expected failure for {:?}", raw);
        }
    }
}

#[cfg(test)]
mod flag_tests {
    use super::*;

    #[test]
    fn test_each_phrase_is_detected() {
        let flagger = DeceptionFlagger::new();
        let cases = vec![
            ("Maybe I was there", FlagCategory::Avoidance, "maybe"),
            ("To be frank, no", FlagCategory::Avoidance, "to be frank"),
            ("It was sort of late", FlagCategory::Avoidance, "sort of"),
            ("I guess so", FlagCategory::Avoidance, "guess"),
            ("I ALREADY TOLD you", FlagCategory::Defensive, "i already told"),
            ("Believe me.", FlagCategory::Defensive, "believe me"),
        ];

        for (text, category, phrase) in cases {
            let flags = flagger.flag(text);
            assert_eq!(flags.len(), 1, "Expected one flag for '{}'", text);
            assert_eq!(flags[0].category, category);
            assert_eq!(flags[0].matched_phrase, phrase);
        }
    }

    #[test]
    fn test_penalty_bound_holds_for_mixed_text() {
        let flagger = DeceptionFlagger::new();
        let text = "Honestly, I think maybe I didn't do it, trust me.";
        let flags = flagger.flag(text);

        assert!(flags.iter().any(|f| f.category == FlagCategory::Avoidance));
        assert!(flags.iter().any(|f| f.category == FlagCategory::Defensive));
        assert!(DeceptionFlagger::penalty(&flags) >= 10);
    }
}

#[cfg(test)]
mod crisis_tests {
    use super::*;

    #[test]
    fn test_crisis_phrases() {
        let detector = CrisisDetector::new();
        let positives = vec![
            "I want to die",
            "i just want to KILL MYSELF",
            "there's no reason to live anymore",
            "thinking about suicide",
            "I don't want to live",
        ];
        for text in positives {
            assert!(detector.is_crisis(text), "Expected crisis for '{}'", text);
        }
    }

    #[test]
    fn test_non_crisis_phrases() {
        let detector = CrisisDetector::new();
        let negatives = vec!["I want pie", "I'm dying to see that movie", "Let's end it here for today"];
        for text in negatives {
            assert!(!detector.is_crisis(text), "Expected no crisis for '{}'", text);
        }
    }
}
