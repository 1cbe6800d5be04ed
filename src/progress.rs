use std::collections::BTreeMap;

use crate::{
    models::{Attempt, GroupTally, ProgressSummary},
    store::{AttemptStore, DataAccessError},
};

/// Progress for one child: one row per (game_code, level) it has played,
/// ordered by game_code then level. A child without attempts yields no rows.
pub async fn compute_progress<S>(
    store: &S,
    child_id: i64,
) -> Result<Vec<ProgressSummary>, DataAccessError>
where
    S: AttemptStore + ?Sized,
{
    let tallies = store.tally_for_child(child_id).await?;

    tracing::debug!(child_id, groups = tallies.len(), "aggregated progress");

    return Ok(summarize(tallies));
}

/// Groups attempts by (game_code, level) and counts them.
pub fn tally<'a, I>(attempts: I) -> Vec<GroupTally>
where
    I: IntoIterator<Item = &'a Attempt>,
{
    let mut groups: BTreeMap<(&'a str, i32), GroupTally> = BTreeMap::new();

    for attempt in attempts {
        let group = groups
            .entry((attempt.game_code.as_str(), attempt.level))
            .or_insert_with(|| GroupTally {
                game_code: attempt.game_code.clone(),
                level: attempt.level,
                correct: 0,
                wrong: 0,
                latency_total: None,
                latency_samples: 0,
            });

        if attempt.result {
            group.correct += 1;
        } else {
            group.wrong += 1;
        }

        if let Some(ms) = attempt.reaction_ms {
            group.latency_total = Some(group.latency_total.unwrap_or(0).saturating_add(ms));
            group.latency_samples += 1;
        }
    }

    return groups.into_values().collect();
}

pub fn summarize(tallies: Vec<GroupTally>) -> Vec<ProgressSummary> {
    let mut summaries: Vec<ProgressSummary> =
        tallies.into_iter().map(ProgressSummary::from).collect();

    // byte order on game_code, whatever collation the store used
    summaries.sort_by(|a, b| {
        a.game_code
            .cmp(&b.game_code)
            .then_with(|| a.level.cmp(&b.level))
    });

    return summaries;
}

impl From<GroupTally> for ProgressSummary {
    fn from(tally: GroupTally) -> Self {
        let avg_ms = match tally.latency_total {
            Some(total) if tally.latency_samples > 0 => {
                Some(total as f64 / tally.latency_samples as f64)
            }
            _ => None,
        };

        return ProgressSummary {
            game_code: tally.game_code,
            level: tally.level,
            correct: tally.correct,
            wrong: tally.wrong,
            avg_ms,
        };
    }
}
