use serde::{Deserialize, Serialize};

use crate::domain::{Player, ScoreEntry, ScoreInput, Scoreboard, Season};
use crate::scoring::positions;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreQuery {
    pub season: Option<String>,
    pub player_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SeasonQuery {
    pub season: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub player_id: String,
    pub points: u32,
    #[serde(default)]
    pub birdies: u32,
    #[serde(default)]
    pub eagles: u32,
    #[serde(default, alias = "muligans")]
    pub mulligans: u32,
    pub season: Season,
}

impl From<ScoreRequest> for ScoreInput {
    fn from(req: ScoreRequest) -> Self {
        Self {
            player_id: req.player_id,
            points: req.points,
            birdies: req.birdies,
            eagles: req.eagles,
            mulligans: req.mulligans,
            season: req.season,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoreResponse {
    pub id: String,
    pub points: u32,
    pub birdies: u32,
    pub eagles: u32,
    pub mulligans: u32,
    pub day: String,
}

/// Scores of one player; `player` is `null` when the season has none
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerScoresResponse {
    pub player: Option<PlayerRef>,
    pub season: Season,
    pub scores: Vec<ScoreResponse>,
}

impl PlayerScoresResponse {
    pub fn new(season: Season, entries: Vec<ScoreEntry>) -> Self {
        let player = entries.first().map(|e| PlayerRef {
            id: e.player_id.clone(),
            name: e.player_name.clone(),
        });
        let scores = entries
            .into_iter()
            .map(|e| ScoreResponse {
                id: e.id,
                points: e.points,
                birdies: e.birdies,
                eagles: e.eagles,
                mulligans: e.mulligans,
                day: e.day,
            })
            .collect();

        Self { player, season, scores }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardPlayer {
    pub id: String,
    pub name: String,
    pub points: i64,
    pub position: usize,
    pub last_played: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScoreboardResponse {
    pub season: Season,
    pub players: Vec<ScoreboardPlayer>,
}

impl From<Scoreboard> for ScoreboardResponse {
    fn from(board: Scoreboard) -> Self {
        let players = positions(&board.standings)
            .map(|(position, s)| ScoreboardPlayer {
                id: s.player_id.clone(),
                name: s.player_name.clone(),
                points: s.total_points,
                position,
                last_played: s.last_played.clone(),
            })
            .collect();

        Self {
            season: board.season,
            players,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MemberRequest {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
}

impl From<Player> for Member {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name,
        }
    }
}
