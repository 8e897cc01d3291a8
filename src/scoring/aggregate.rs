use std::collections::BTreeMap;

use super::formula::entry_points;
use crate::domain::{ScoreEntry, Standing};

type StandingKey = (String, String);

/// Fold the entries of one season into one standing per `(player_id, player_name)`.
///
/// Entries are grouped by the denormalized name as well as the id, so a member
/// renamed mid-season shows up once per name. Output is ordered by key; callers
/// that need the ranked order go through [`super::ranking::rank_standings`].
pub fn aggregate_standings<'a, I>(entries: I) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a ScoreEntry>,
{
    let mut standings: BTreeMap<StandingKey, Standing> = BTreeMap::new();

    for entry in entries {
        let key = (entry.player_id.clone(), entry.player_name.clone());
        let standing = standings.entry(key).or_insert_with(|| Standing {
            player_id: entry.player_id.clone(),
            player_name: entry.player_name.clone(),
            total_points: 0,
            last_played: String::new(),
        });

        standing.total_points += entry_points(entry);
        // ISO dates order correctly as strings
        if standing.last_played < entry.day {
            standing.last_played = entry.day.clone();
        }
    }

    standings.into_values().collect()
}

/// Same as [`aggregate_standings`] but only over entries of `season`
pub fn season_standings<'a, I>(entries: I, season: i32) -> Vec<Standing>
where
    I: IntoIterator<Item = &'a ScoreEntry>,
{
    aggregate_standings(entries.into_iter().filter(|e| e.season == season))
}
