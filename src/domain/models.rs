use serde::Serialize;

pub type PlayerId = String;
pub type ScoreId = String;
pub type Season = i32;
pub type Points = i64;

/// Tour member as kept by the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// One round played by one player in one season
///
/// `player_name` is copied from the roster when the entry is created and is
/// never rewritten when the member is renamed later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub id: ScoreId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub points: u32,
    pub birdies: u32,
    pub eagles: u32,
    pub mulligans: u32,
    pub season: Season,
    /// `YYYY-MM-DD`; compared as a string
    pub day: String,
}

/// Caller-supplied part of a score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreInput {
    pub player_id: PlayerId,
    pub points: u32,
    pub birdies: u32,
    pub eagles: u32,
    pub mulligans: u32,
    pub season: Season,
}

/// Entry resolved by the service and handed to a store, which assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScore {
    pub player_id: PlayerId,
    pub player_name: String,
    pub points: u32,
    pub birdies: u32,
    pub eagles: u32,
    pub mulligans: u32,
    pub season: Season,
    pub day: String,
}

impl NewScore {
    pub fn from_input(input: ScoreInput, player: &Player, day: String) -> Self {
        Self {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            points: input.points,
            birdies: input.birdies,
            eagles: input.eagles,
            mulligans: input.mulligans,
            season: input.season,
            day,
        }
    }

    pub fn into_entry(self, id: ScoreId) -> ScoreEntry {
        ScoreEntry {
            id,
            player_id: self.player_id,
            player_name: self.player_name,
            points: self.points,
            birdies: self.birdies,
            eagles: self.eagles,
            mulligans: self.mulligans,
            season: self.season,
            day: self.day,
        }
    }
}

/// Seasonal total of one `(player_id, player_name)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub player_id: PlayerId,
    pub player_name: String,
    pub total_points: Points,
    /// Empty when the player has no entries that season
    pub last_played: String,
}

impl Standing {
    pub fn without_entries(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            player_name: player.name.clone(),
            total_points: 0,
            last_played: String::new(),
        }
    }
}

/// Ranked standings of one season, best first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub season: Season,
    pub standings: Vec<Standing>,
}
