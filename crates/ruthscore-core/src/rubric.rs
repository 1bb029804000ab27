//! Rubric definition
//!
//! The rubric is static data: four components of 25 points, each made of
//! rule checks whose conditions carry fixed point weights. The weights are
//! part of the external contract (the 90-point pass threshold depends on
//! them) and must not be re-derived.

use crate::artifact::ArtifactRole;
use crate::check::{MarkerRule, RuleCheck};
use crate::component::Component;
use crate::error::{Result, ScoreError};
use crate::marker::Marker;

/// Maximum total score of a rubric
pub const TOTAL_MAX: f64 = 100.0;

/// Tolerance when comparing point sums
const POINTS_EPSILON: f64 = 1e-6;

/// What a condition looks for
#[derive(Debug, Clone, Copy)]
pub enum ConditionKind {
    /// A single marker, present or absent
    Marker(Marker),
    /// At least `min` of `markers` present
    Threshold {
        markers: &'static [&'static str],
        min: usize,
        noun: &'static str,
    },
}

/// A scored sub-condition of a rule
#[derive(Debug, Clone, Copy)]
pub struct Condition {
    pub points: f64,
    pub kind: ConditionKind,
    /// Issue reported when the condition is not met. Threshold conditions
    /// build their message from the found count instead.
    pub issue: &'static str,
}

/// Static description of one rule check
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    pub id: &'static str,
    pub label: &'static str,
    pub role: ArtifactRole,
    pub max: f64,
    pub conditions: &'static [Condition],
}

impl RuleDef {
    /// Sum of all condition points
    pub fn condition_points(&self) -> f64 {
        self.conditions.iter().map(|c| c.points).sum()
    }
}

/// Static description of one component
#[derive(Debug, Clone, Copy)]
pub struct ComponentDef {
    pub id: &'static str,
    pub name: &'static str,
    pub max: f64,
    pub rules: &'static [RuleDef],
}

const fn marker(points: f64, marker: Marker, issue: &'static str) -> Condition {
    Condition {
        points,
        kind: ConditionKind::Marker(marker),
        issue,
    }
}

const fn literal(points: f64, text: &'static str, issue: &'static str) -> Condition {
    marker(points, Marker::Literal(text), issue)
}

/// Frustration phrases the validator must recognise
pub const FRUSTRATION_TRIGGERS: &[&str] = &["נמאס", "זה לא עוזר", "אני פורש", "עזבי", "די"];

/// Phrases of the hardcoded first intake message
pub const INTAKE_PHRASES: &[&str] = &["שלום", "מה קרה", "מה אתה רוצה", "מה אסור"];

const FIRST_MESSAGE: RuleDef = RuleDef {
    id: "first-message",
    label: "First message format",
    role: ArtifactRole::IntakeHandler,
    max: 10.0,
    conditions: &[
        literal(2.5, "שלום", "Missing: שלום"),
        literal(2.5, "מה קרה", "Missing: מה קרה"),
        literal(2.5, "מה אתה רוצה", "Missing: מה אתה רוצה"),
        literal(2.5, "מה אסור", "Missing: מה אסור"),
    ],
};

const SYSTEM_PROMPT_RULES: RuleDef = RuleDef {
    id: "system-prompt-rules",
    label: "System prompt rules",
    role: ArtifactRole::SystemPrompt,
    max: 15.0,
    conditions: &[
        literal(2.0, "RULE 1: WORD LIMIT", "Missing rule: RULE 1: WORD LIMIT"),
        literal(
            2.0,
            "RULE 2: ONE QUESTION ONLY",
            "Missing rule: RULE 2: ONE QUESTION ONLY",
        ),
        literal(2.0, "RULE 3: FAST INTAKE", "Missing rule: RULE 3: FAST INTAKE"),
        literal(
            2.0,
            "RULE 4: DRAFT BY TURN 5",
            "Missing rule: RULE 4: DRAFT BY TURN 5",
        ),
        literal(
            2.0,
            "RULE 5: FRUSTRATION DETECTOR",
            "Missing rule: RULE 5: FRUSTRATION DETECTOR",
        ),
        literal(
            2.0,
            "RULE 6: PERSPECTIVE CLARITY",
            "Missing rule: RULE 6: PERSPECTIVE CLARITY",
        ),
        literal(2.0, "RULE 7: NO REPETITION", "Missing rule: RULE 7: NO REPETITION"),
        literal(
            1.0,
            "RUTH V2 BEHAVIORAL OVERRIDE",
            "Missing rule: RUTH V2 BEHAVIORAL OVERRIDE",
        ),
    ],
};

const WORD_COUNT: RuleDef = RuleDef {
    id: "word-count",
    label: "Word count",
    role: ArtifactRole::ResponseValidator,
    max: 10.0,
    conditions: &[
        marker(
            4.0,
            Marker::Constant {
                name: "MAX_WORDS",
                value: "55",
            },
            "Missing MAX_WORDS = 55 constant",
        ),
        literal(
            3.0,
            "checkResponseQuality",
            "Missing checkResponseQuality function",
        ),
        literal(
            3.0,
            "truncateToWordLimit",
            "Missing truncateToWordLimit function",
        ),
    ],
};

const QUESTION_DISCIPLINE: RuleDef = RuleDef {
    id: "question-discipline",
    label: "Questions",
    role: ArtifactRole::ResponseValidator,
    max: 8.0,
    conditions: &[
        marker(
            4.0,
            Marker::Constant {
                name: "MAX_QUESTIONS",
                value: "1",
            },
            "Missing MAX_QUESTIONS = 1 constant",
        ),
        literal(
            4.0,
            "removeExtraQuestions",
            "Missing removeExtraQuestions function",
        ),
    ],
};

const PERSPECTIVE: RuleDef = RuleDef {
    id: "perspective",
    label: "Perspective",
    role: ArtifactRole::SystemPrompt,
    max: 7.0,
    conditions: &[
        literal(
            4.0,
            "אתה מעריך שהיא הרגישה",
            "Missing partner perspective prefix",
        ),
        literal(3.0, "אתה מרגיש", "Missing user perspective prefix"),
    ],
};

const FRUSTRATION: RuleDef = RuleDef {
    id: "frustration",
    label: "Frustration handling",
    role: ArtifactRole::ResponseValidator,
    max: 10.0,
    conditions: &[
        literal(3.0, "detectFrustration", "Missing detectFrustration function"),
        Condition {
            points: 3.0,
            kind: ConditionKind::Threshold {
                markers: FRUSTRATION_TRIGGERS,
                min: 4,
                noun: "frustration triggers",
            },
            issue: "",
        },
        literal(2.0, "getFrustrationMenu", "Missing getFrustrationMenu function"),
        marker(
            2.0,
            Marker::NumberedOptions(&["1", "2", "3"]),
            "Menu missing numbered options",
        ),
    ],
};

const DRAFT_TIMING: RuleDef = RuleDef {
    id: "draft-timing",
    label: "Draft timing",
    role: ArtifactRole::ResponseValidator,
    max: 8.0,
    conditions: &[
        literal(
            4.0,
            "shouldGenerateDraft",
            "Missing shouldGenerateDraft function",
        ),
        literal(2.0, "turnCount >= 4", "Missing turnCount >= 4 trigger"),
        marker(
            2.0,
            Marker::AllOf(&["hasSubstantialContent", "hasMentionedGoal"]),
            "Missing early draft trigger logic",
        ),
    ],
};

const CONVERSATION_FLOW: RuleDef = RuleDef {
    id: "conversation-flow",
    label: "Flow",
    role: ArtifactRole::MessagePipeline,
    max: 7.0,
    conditions: &[
        literal(2.0, "RUTH V2 state", "Missing RUTH V2 state logging"),
        literal(
            2.0,
            "getFrustrationMenu",
            "Missing frustration handling in pipeline",
        ),
        marker(
            3.0,
            Marker::AllOf(&["shouldDraft", "shouldGenerateDraft"]),
            "Missing draft trigger in pipeline",
        ),
    ],
};

const TEMPLATES: RuleDef = RuleDef {
    id: "templates",
    label: "Templates",
    role: ArtifactRole::ResponseValidator,
    max: 8.0,
    conditions: &[
        literal(2.0, "apology", "Missing template: apology"),
        literal(2.0, "boundary", "Missing template: boundary"),
        literal(2.0, "future_rule", "Missing template: future_rule"),
        literal(2.0, "selectTemplate", "Missing selectTemplate function"),
    ],
};

const PIPELINE_INTEGRATION: RuleDef = RuleDef {
    id: "pipeline-integration",
    label: "Pipeline integration",
    role: ArtifactRole::MessagePipeline,
    max: 9.0,
    conditions: &[
        literal(
            3.0,
            "checkResponseQuality",
            "checkResponseQuality not imported in pipeline",
        ),
        literal(
            3.0,
            "detectFrustration",
            "detectFrustration not imported in pipeline",
        ),
        literal(
            3.0,
            "shouldGenerateDraft",
            "shouldGenerateDraft not imported in pipeline",
        ),
    ],
};

const RULE_ZERO: RuleDef = RuleDef {
    id: "rule-zero",
    label: "RULE 0 (intake)",
    role: ArtifactRole::IntakeHandler,
    max: 8.0,
    conditions: &[literal(
        8.0,
        "RULE 0",
        "RULE 0 comment not found in callbackHandler",
    )],
};

/// The standard RUTH V2 rubric, in evaluation order
pub const STANDARD_COMPONENTS: &[ComponentDef] = &[
    ComponentDef {
        id: "intake",
        name: "Intake Quality",
        max: 25.0,
        rules: &[FIRST_MESSAGE, SYSTEM_PROMPT_RULES],
    },
    ComponentDef {
        id: "response",
        name: "Response Quality",
        max: 25.0,
        rules: &[WORD_COUNT, QUESTION_DISCIPLINE, PERSPECTIVE],
    },
    ComponentDef {
        id: "wisdom",
        name: "Conversation Wisdom",
        max: 25.0,
        rules: &[FRUSTRATION, DRAFT_TIMING, CONVERSATION_FLOW],
    },
    ComponentDef {
        id: "success",
        name: "Overall Success",
        max: 25.0,
        rules: &[TEMPLATES, PIPELINE_INTEGRATION, RULE_ZERO],
    },
];

/// An ordered set of components scored together
pub struct Rubric {
    components: Vec<Component>,
    max: f64,
}

impl Rubric {
    pub fn new(components: Vec<Component>, max: f64) -> Self {
        Self { components, max }
    }

    /// Build a rubric from static component definitions
    pub fn from_defs(defs: &'static [ComponentDef], max: f64) -> Self {
        let components = defs
            .iter()
            .map(|def| {
                let checks = def
                    .rules
                    .iter()
                    .map(|rule| Box::new(MarkerRule::new(rule)) as Box<dyn RuleCheck>)
                    .collect();
                Component::new(def.id, def.name, def.max, checks)
            })
            .collect();
        Self::new(components, max)
    }

    /// The standard rubric
    pub fn standard() -> Self {
        Self::from_defs(STANDARD_COMPONENTS, TOTAL_MAX)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Check that every declared maximum equals the sum of its parts.
    pub fn validate(&self) -> Result<()> {
        for component in &self.components {
            component.validate()?;
        }

        let total: f64 = self.components.iter().map(|c| c.max()).sum();
        if (total - self.max).abs() > POINTS_EPSILON {
            return Err(ScoreError::malformed_rubric(format!(
                "component maxima sum to {}, expected {}",
                total, self.max
            )));
        }

        Ok(())
    }
}

/// Check a static rule definition's condition points against its maximum
pub(crate) fn validate_rule_def(def: &RuleDef) -> Result<()> {
    let points = def.condition_points();
    if (points - def.max).abs() > POINTS_EPSILON {
        return Err(ScoreError::malformed_rubric(format!(
            "rule '{}' conditions sum to {}, expected {}",
            def.id, points, def.max
        )));
    }
    Ok(())
}

pub(crate) fn points_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= POINTS_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rubric_is_valid() {
        Rubric::standard().validate().unwrap();
    }

    #[test]
    fn test_every_component_max_is_25() {
        for def in STANDARD_COMPONENTS {
            let sum: f64 = def.rules.iter().map(|r| r.max).sum();
            assert_eq!(sum, 25.0, "component {}", def.id);
            assert_eq!(def.max, 25.0);
        }
    }

    #[test]
    fn test_component_maxima_sum_to_100() {
        let total: f64 = STANDARD_COMPONENTS.iter().map(|c| c.max).sum();
        assert_eq!(total, TOTAL_MAX);
    }

    #[test]
    fn test_rule_maxima_order() {
        let maxima: Vec<f64> = STANDARD_COMPONENTS
            .iter()
            .flat_map(|c| c.rules.iter().map(|r| r.max))
            .collect();
        assert_eq!(
            maxima,
            vec![10.0, 15.0, 10.0, 8.0, 7.0, 10.0, 8.0, 7.0, 8.0, 9.0, 8.0]
        );
    }

    #[test]
    fn test_rule_conditions_sum_to_max() {
        for def in STANDARD_COMPONENTS {
            for rule in def.rules {
                validate_rule_def(rule).unwrap();
            }
        }
    }

    #[test]
    fn test_component_order() {
        let rubric = Rubric::standard();
        let names: Vec<&str> = rubric
            .components()
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(
            names,
            vec![
                "Intake Quality",
                "Response Quality",
                "Conversation Wisdom",
                "Overall Success"
            ]
        );
    }

    #[test]
    fn test_rule_ids_are_unique() {
        let mut ids: Vec<&str> = STANDARD_COMPONENTS
            .iter()
            .flat_map(|c| c.rules.iter().map(|r| r.id))
            .collect();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_wrong_total_is_malformed() {
        let rubric = Rubric::from_defs(&STANDARD_COMPONENTS[..3], TOTAL_MAX);
        let err = rubric.validate().unwrap_err();
        assert!(matches!(err, ScoreError::MalformedRubric { .. }));
    }
}
