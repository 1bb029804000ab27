//! Reference data for reviewers and tests
//!
//! The conversations and the expected first message document how a
//! conforming agent behaves. They are never consumed by scoring. The
//! `SAMPLE_*` artifacts form a minimal set that scores 100 in both match
//! modes.

use crate::artifact::{ArtifactRole, MemoryLoader};

/// Speaker and text of one conversation turn
pub type Turn = (&'static str, &'static str);

/// A standard intake that should reach a draft
pub const STANDARD_CONVERSATION: &[Turn] = &[
    ("User", "היא כעסה שלא עזרתי במטבח"),
    ("User", "נשאבתי למחשב, לא שמתי לב"),
    ("User", "אני רוצה שהיא תבין"),
    ("User", "כן, זה בדיוק"),
];

/// A user who gets frustrated and then picks menu option 1
pub const FRUSTRATION_CONVERSATION: &[Turn] = &[
    ("User", "היא כעסה שלא עזרתי"),
    ("User", "נמאס לי מזה, זה לא עוזר"),
    ("User", "1"),
];

/// A user who asks for a future rule
pub const COMPLEX_CONVERSATION: &[Turn] = &[
    ("User", "היא אומרת שאני לא משקיע בילדות"),
    ("User", "תמיד בעבודה"),
    ("User", "בוא נקבע כלל לעתיד"),
];

/// The first message the agent must send
pub const EXPECTED_FIRST_MESSAGE: &str = "שלום! אני רות, מנחה זוגי.
בואו נתחיל בתלוש (משפט אחד לכל שאלה):
1️⃣ מה קרה?
2️⃣ מה אתה רוצה שיקרה בסוף?
3️⃣ מה אסור שיקרה?";

pub const SAMPLE_INTAKE_HANDLER: &str = r#"export async function handleModeChoice(ctx: Context, choice: string) {
  if (choice === 'solo') {
    // RULE 0: First message MUST be the intake template
    await ctx.reply(`שלום! אני רות, מנחה זוגי.
בואו נתחיל בתלוש (משפט אחד לכל שאלה):
1️⃣ מה קרה?
2️⃣ מה אתה רוצה שיקרה בסוף?
3️⃣ מה אסור שיקרה?`);
  }
}
"#;

pub const SAMPLE_SYSTEM_PROMPT: &str = r#"export function buildCoachingPrompt(): string {
  return `=== RUTH V2 BEHAVIORAL OVERRIDE ===
RULE 1: WORD LIMIT
RULE 2: ONE QUESTION ONLY
RULE 3: FAST INTAKE (First 4 turns only)
RULE 4: DRAFT BY TURN 5
RULE 5: FRUSTRATION DETECTOR
RULE 6: PERSPECTIVE CLARITY
- When describing partner's feeling: "אתה מעריך שהיא הרגישה..."
- When describing user's feeling: "אתה מרגיש..."
RULE 7: NO REPETITION`;
}
"#;

pub const SAMPLE_RESPONSE_VALIDATOR: &str = r#"const MAX_WORDS = 55;
const MAX_QUESTIONS = 1;

export function checkResponseQuality(response: string): string {
  let cleaned = removeExtraQuestions(response);
  return truncateToWordLimit(cleaned, MAX_WORDS);
}

function removeExtraQuestions(text: string): string { return text; }
function truncateToWordLimit(text: string, limit: number): string { return text; }

const FRUSTRATION_TRIGGERS = ['נמאס', 'זה לא עוזר', 'אני פורש', 'עזבי', 'די'];

export function detectFrustration(message: string): boolean {
  return FRUSTRATION_TRIGGERS.some((t) => message.includes(t));
}

export function getFrustrationMenu(): string {
  return `בחר אחד:
1⃣ ניסוח התנצלות קצר
2⃣ ניסוח גבול
3⃣ כלל לעתיד`;
}

export function shouldGenerateDraft(turnCount: number, text: string): boolean {
  if (turnCount >= 4) return true;
  const hasSubstantialContent = text.length > 100;
  const hasMentionedGoal = /רוצה|צריך/.test(text);
  return turnCount >= 3 && hasSubstantialContent && hasMentionedGoal;
}

export type MessageTemplate = 'apology' | 'boundary' | 'future_rule';

export function selectTemplate(isFrustrated: boolean): MessageTemplate {
  return isFrustrated ? 'apology' : 'boundary';
}
"#;

pub const SAMPLE_MESSAGE_PIPELINE: &str = r#"import { checkResponseQuality, detectFrustration, getFrustrationMenu, shouldGenerateDraft } from '../../utils/responseValidator';

export async function processMessage(input: PipelineInput) {
  const isFrustrated = detectFrustration(input.text);
  const shouldDraft = shouldGenerateDraft(input.turnCount, input.text);
  logger.info('RUTH V2 state', { isFrustrated, shouldDraft });
  if (isFrustrated) return getFrustrationMenu();
  return checkResponseQuality(await respond(input, shouldDraft));
}
"#;

/// Loader holding the complete sample artifact set
pub fn complete_artifacts() -> MemoryLoader {
    MemoryLoader::new()
        .with(ArtifactRole::IntakeHandler, SAMPLE_INTAKE_HANDLER)
        .with(ArtifactRole::SystemPrompt, SAMPLE_SYSTEM_PROMPT)
        .with(ArtifactRole::ResponseValidator, SAMPLE_RESPONSE_VALIDATOR)
        .with(ArtifactRole::MessagePipeline, SAMPLE_MESSAGE_PIPELINE)
}

/// Sample text for a role
pub fn sample(role: ArtifactRole) -> &'static str {
    match role {
        ArtifactRole::IntakeHandler => SAMPLE_INTAKE_HANDLER,
        ArtifactRole::SystemPrompt => SAMPLE_SYSTEM_PROMPT,
        ArtifactRole::ResponseValidator => SAMPLE_RESPONSE_VALIDATOR,
        ArtifactRole::MessagePipeline => SAMPLE_MESSAGE_PIPELINE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rubric::{FRUSTRATION_TRIGGERS, INTAKE_PHRASES};

    #[test]
    fn test_expected_first_message_has_intake_phrases() {
        for phrase in INTAKE_PHRASES {
            assert!(EXPECTED_FIRST_MESSAGE.contains(phrase), "{}", phrase);
        }
    }

    #[test]
    fn test_frustration_conversation_triggers() {
        let text: String = FRUSTRATION_CONVERSATION
            .iter()
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join("\n");
        let found = FRUSTRATION_TRIGGERS
            .iter()
            .filter(|t| text.contains(**t))
            .count();
        assert!(found >= 2);
        assert_eq!(FRUSTRATION_CONVERSATION.last().map(|t| t.1), Some("1"));
    }

    #[test]
    fn test_calm_conversations_have_no_leading_triggers() {
        // "די" appears inside ordinary words, so only whole-phrase triggers count
        for conversation in [STANDARD_CONVERSATION, COMPLEX_CONVERSATION] {
            for (_, line) in conversation.iter() {
                assert!(!line.contains("נמאס"));
                assert!(!line.contains("זה לא עוזר"));
            }
        }
    }

    #[test]
    fn test_samples_match_loader() {
        let loader = complete_artifacts();
        for role in ArtifactRole::ALL {
            use crate::artifact::ArtifactLoader;
            assert_eq!(loader.load(role).as_deref(), Some(sample(role)));
        }
    }
}
