//! Objective display text.
//!
//! Resolves an objective's description template against its effective
//! parameters, falling back to authored or synthesized text when tokens
//! remain unresolved, and annotates pending objectives with live progress.

use tracing::debug;

use crate::conditions::{ConditionKind, Params};
use crate::core::Difficulty;
use crate::objectives::{ObjectiveDefinition, ObjectiveState};

use super::template::{expand_template, has_tokens};

/// Render the display string for an objective.
///
/// Fallback order when the template does not fully resolve: the authored
/// plain description (if token-free), then a sentence synthesized from
/// the resolved parameters, then the unresolved text itself. A pending
/// objective with a non-zero progress target gets a `" (current/target)"`
/// suffix; terminal objectives never do.
#[must_use]
pub fn describe_objective(
    definition: &ObjectiveDefinition,
    state: &ObjectiveState,
    difficulty: Option<Difficulty>,
) -> String {
    let params = definition.condition.effective_params(difficulty);
    let mut text = expand_template(&definition.description, &params);

    if has_tokens(&text) {
        debug!(id = %definition.id, "description template did not fully resolve");
        text = fallback_text(definition, &params).unwrap_or(text);
    }

    if state.is_pending() {
        if let Some(progress) = state.progress {
            if progress.target != 0 {
                return format!("{text} ({progress})");
            }
        }
    }

    text
}

fn fallback_text(definition: &ObjectiveDefinition, params: &Params) -> Option<String> {
    if let Some(fallback) = &definition.fallback_description {
        if !has_tokens(fallback) {
            return Some(fallback.clone());
        }
    }
    synthesized_text(definition.condition.kind, params)
}

/// Hard-coded sentences for the kinds whose parameters pluralize
/// naturally.
fn synthesized_text(kind: ConditionKind, params: &Params) -> Option<String> {
    match kind {
        ConditionKind::MaxCasualties => params.int("maxLosses").map(|n| match n {
            0 => "Win without losing a single piece".to_string(),
            1 => "Win with no more than 1 casualty".to_string(),
            n => format!("Win with no more than {n} casualties"),
        }),
        ConditionKind::DontKillCourtiers => params.int("maxKills").map(|n| match n {
            0 => "Do not destroy any courtiers".to_string(),
            1 => "Destroy no more than 1 courtier".to_string(),
            n => format!("Destroy no more than {n} courtiers"),
        }),
        ConditionKind::WinUnderTurns => params.int("maxTurns").map(|n| {
            if n == 1 {
                "Win on the first turn".to_string()
            } else {
                format!("Win within {n} turns")
            }
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditions::Condition;
    use crate::objectives::ObjectiveId;

    fn state_for(definition: &ObjectiveDefinition) -> ObjectiveState {
        ObjectiveState::new(definition.id)
    }

    #[test]
    fn test_resolved_template() {
        let definition = ObjectiveDefinition::new(
            ObjectiveId::new(1),
            "Win with no more than {{maxLosses}} {{plural|maxLosses|casualty|casualties}}",
            Condition::new(ConditionKind::MaxCasualties).with_param("maxLosses", 1),
            25,
        );

        let text = describe_objective(&definition, &state_for(&definition), None);
        assert_eq!(text, "Win with no more than 1 casualty");
    }

    #[test]
    fn test_difficulty_override_changes_text() {
        let definition = ObjectiveDefinition::new(
            ObjectiveId::new(1),
            "Win within {{maxTurns}} turn{{s|maxTurns}}",
            Condition::new(ConditionKind::WinUnderTurns)
                .with_param("maxTurns", 20)
                .with_override(
                    Difficulty::Hard,
                    Params::new().with("maxTurns", 12),
                ),
            25,
        );

        let state = state_for(&definition);
        assert_eq!(
            describe_objective(&definition, &state, Some(Difficulty::Hard)),
            "Win within 12 turns"
        );
        assert_eq!(
            describe_objective(&definition, &state, Some(Difficulty::Normal)),
            "Win within 20 turns"
        );
    }

    #[test]
    fn test_fallback_to_plain_description() {
        let definition = ObjectiveDefinition::new(
            ObjectiveId::new(1),
            "Spare the {{missingParam}}",
            Condition::new(ConditionKind::Custom),
            25,
        )
        .with_fallback_description("Spare the garrison");

        let text = describe_objective(&definition, &state_for(&definition), None);
        assert_eq!(text, "Spare the garrison");
    }

    #[test]
    fn test_fallback_to_synthesized_sentence() {
        let definition = ObjectiveDefinition::new(
            ObjectiveId::new(1),
            "Lose at most {{wrongKey}} pieces",
            Condition::new(ConditionKind::MaxCasualties).with_param("maxLosses", 2),
            25,
        );
        assert_eq!(
            describe_objective(&definition, &state_for(&definition), None),
            "Win with no more than 2 casualties"
        );

        let singular = ObjectiveDefinition::new(
            ObjectiveId::new(2),
            "{{wrongKey}}",
            Condition::new(ConditionKind::MaxCasualties).with_param("maxLosses", 1),
            25,
        );
        assert_eq!(
            describe_objective(&singular, &state_for(&singular), None),
            "Win with no more than 1 casualty"
        );

        let courtiers = ObjectiveDefinition::new(
            ObjectiveId::new(3),
            "{{wrongKey}}",
            Condition::new(ConditionKind::DontKillCourtiers).with_param("maxKills", 0),
            25,
        );
        assert_eq!(
            describe_objective(&courtiers, &state_for(&courtiers), None),
            "Do not destroy any courtiers"
        );

        let turns = ObjectiveDefinition::new(
            ObjectiveId::new(4),
            "{{wrongKey}}",
            Condition::new(ConditionKind::WinUnderTurns).with_param("maxTurns", 15),
            25,
        );
        assert_eq!(
            describe_objective(&turns, &state_for(&turns), None),
            "Win within 15 turns"
        );
    }

    #[test]
    fn test_unresolvable_text_returned_as_is() {
        let definition = ObjectiveDefinition::new(
            ObjectiveId::new(1),
            "Appease the {{spirits}}",
            Condition::new(ConditionKind::Custom),
            25,
        );

        let text = describe_objective(&definition, &state_for(&definition), None);
        assert_eq!(text, "Appease the {{spirits}}");
    }

    #[test]
    fn test_progress_suffix_only_while_pending() {
        let definition = ObjectiveDefinition::new(
            ObjectiveId::new(1),
            "Convert {{count}} pieces",
            Condition::new(ConditionKind::ConvertPieces).with_param("count", 3),
            25,
        );

        let mut state = state_for(&definition);
        state.progress = Some(crate::conditions::Progress::new(1, 3));
        assert_eq!(
            describe_objective(&definition, &state, None),
            "Convert 3 pieces (1/3)"
        );

        // Terminal states drop the suffix.
        let mut completed = state.clone();
        completed.complete(5);
        assert_eq!(
            describe_objective(&definition, &completed, None),
            "Convert 3 pieces"
        );

        let mut failed = state.clone();
        failed.fail(5);
        assert_eq!(
            describe_objective(&definition, &failed, None),
            "Convert 3 pieces"
        );
    }

    #[test]
    fn test_zero_target_progress_has_no_suffix() {
        let definition = ObjectiveDefinition::new(
            ObjectiveId::new(1),
            "Lose no knights",
            Condition::new(ConditionKind::NoPieceTypeLost).with_param("pieceType", "knight"),
            25,
        );

        let mut state = state_for(&definition);
        state.progress = Some(crate::conditions::Progress::new(0, 0));
        assert_eq!(
            describe_objective(&definition, &state, None),
            "Lose no knights"
        );
    }
}
