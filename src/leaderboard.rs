use itertools::Itertools;

use crate::game::{Player, Team};

/// Players by score, highest first; ties keep turn order
pub fn ranked(players: &[Player]) -> Vec<&Player> {
    players
        .iter()
        .sorted_by(|a, b| b.score.cmp(&a.score))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamStandings {
    pub a: u32,
    pub b: u32,
}

impl TeamStandings {
    pub fn from_players(players: &[Player]) -> Self {
        players
            .iter()
            .fold(TeamStandings::default(), |mut acc, p| {
                match p.team {
                    Some(Team::A) => acc.a += p.score,
                    Some(Team::B) => acc.b += p.score,
                    None => {}
                }
                acc
            })
    }

    /// `None` on a tie
    pub fn leader(&self) -> Option<Team> {
        match self.a.cmp(&self.b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn score(&self, team: Team) -> u32 {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }
}

/// Results-screen headline for a turn's accuracy
pub fn headline(accuracy: u32) -> &'static str {
    match accuracy {
        80.. => "Outstanding Performance!",
        60..=79 => "Great Job!",
        40..=59 => "Good Effort!",
        _ => "Keep Practicing!",
    }
}
