//! Reference glossary of the API's game types.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Finnish product name and a short description of a game type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameInfo {
    pub also_known_as: &'static str,
    pub description: &'static str,
}

/// Game types keyed by the term the API uses for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameGlossary(BTreeMap<&'static str, GameInfo>);

impl GameGlossary {
    pub fn get(&self, api_term: &str) -> Option<&GameInfo> {
        self.0.get(api_term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &GameInfo)> {
        self.0.iter().map(|(term, info)| (*term, info))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GameGlossary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (term, info) in self.iter() {
            writeln!(f, "############# {} - {term} #############", info.also_known_as)?;
            writeln!(f, "API Term:\t\t\t{term}")?;
            writeln!(f, "Also known as:\t\t\t{}", info.also_known_as)?;
            writeln!(f, "{}", info.description)?;
            writeln!(f)?;
        }
        Ok(())
    }
}

static GLOSSARY: LazyLock<GameGlossary> = LazyLock::new(|| {
    GameGlossary(BTreeMap::from([
        (
            "FIXEDODDS",
            GameInfo {
                also_known_as: "Pitkäveto",
                description: "In fixed odds betting (Pitkäveto), you predict winners or outcomes \
                    for 1–20 matches. Stakes vary based on match count, sport, or time. Popular \
                    sports include soccer and ice hockey. You can bet individually or use system \
                    betting for multiple combinations. Different bet types for the same match \
                    can't be combined, except for Build-a-bet. Odds may change before closing, \
                    and the recorded odds on the betting slip are final.",
            },
        ),
        (
            "MULTISCORE",
            GameInfo {
                also_known_as: "Moniveto",
                description: "Multi score (Moniveto) is a variable odds betting game based on the \
                    number of goals scored in 2–6 matches or other performance outcomes. Minimum \
                    bet ranges from 0.05 to 0.20 euros, with a maximum of 100 euros. Final odds \
                    can differ significantly from initial ones due to total bet sums influencing \
                    them post-game.",
            },
        ),
        (
            "SCORE",
            GameInfo {
                also_known_as: "Tulosveto",
                description: "Result (or score) betting (Tulosveto) involves betting on the number \
                    of goals scored by both teams in the target match or other correct outcomes \
                    based on performance. Popular sports for result betting include soccer, ice \
                    hockey, basketball, and floorball. The bet ranges from 1.00 to 100.00 euros. \
                    Result betting is a variable odds game, where the odds are calculated after \
                    the game based on the total sum of bets placed on each outcome. Final odds \
                    may significantly differ from the initial ones.",
            },
        ),
        (
            "SPORT",
            GameInfo {
                also_known_as: "Vakio",
                description: "In Vakio, you predict the winners of 6–18 matches in regular game \
                    time (1=home win, X=draw, 2=away win), or the outcome of a competition between \
                    two or three competitors. Winners are selected for each match. Vakio 1 always \
                    has 13 match options, while other Vakios have 6–18 options. Prize categories \
                    vary based on the number of matches, and winnings depend on the number of \
                    correct predictions. The price per Vakio line ranges from 0.10 to 0.25 euros \
                    per match. Sports in Vakio mainly include soccer, ice hockey, Formula 1, and \
                    individual sports.",
            },
        ),
        (
            "WINNER",
            GameInfo {
                also_known_as: "Voittajaveto",
                description: "Win bet (Voittajaveto) involves betting on winners of events, \
                    specific correct result combinations, or outcome options. Popular sports \
                    include soccer, ice hockey, winter sports, and Formula 1. Bet ranges from \
                    0.20 to 100.00 euros. It's a variable odds game where the final odds may \
                    differ significantly from the purchase odds. Other forms include Perfecta, \
                    Trifecta, Daily Double, and Daily Triple.",
            },
        ),
        (
            "PICKTWO",
            GameInfo {
                also_known_as: "Päivän pari",
                description: "In Daily Double aka \"Pick two\" (Päivän pari), the subject of the \
                    bet is the winners of two different competitions or specific defined result \
                    combinations or options.",
            },
        ),
        (
            "PICKTHREE",
            GameInfo {
                also_known_as: "Päivän trio",
                description: "In Daily Triple aka \"Pick three\" (Päivän trio), the subject of the \
                    bet is the winners of three different competitions or specific defined result \
                    combinations or options.",
            },
        ),
        (
            "PERFECTA",
            GameInfo {
                also_known_as: "Superkaksari",
                description: "In Perfecta (Superkaksari), the subject of the bet is the winner of \
                    the competition and the competitor who finishes second in order of \
                    superiority.",
            },
        ),
        (
            "TRIFECTA",
            GameInfo {
                also_known_as: "Supertripla",
                description: "In Trifecta (Supertripla), the subject of the bet is the winner, the \
                    second-place finisher, and the third-place finisher in order of superiority.",
            },
        ),
    ]))
});

/// The static game glossary.
pub fn glossary() -> &'static GameGlossary {
    &GLOSSARY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_every_game_type() {
        let terms: Vec<_> = glossary().iter().map(|(term, _)| term).collect();
        assert_eq!(
            terms,
            vec![
                "FIXEDODDS", "MULTISCORE", "PERFECTA", "PICKTHREE", "PICKTWO", "SCORE", "SPORT",
                "TRIFECTA", "WINNER",
            ]
        );
    }

    #[test]
    fn lookup_by_api_term() {
        let info = glossary().get("SPORT").unwrap();
        assert_eq!(info.also_known_as, "Vakio");
        assert!(glossary().get("LOTTO").is_none());
    }

    #[test]
    fn display_renders_each_entry() {
        let rendered = glossary().to_string();
        assert!(rendered.starts_with("############# Pitkäveto - FIXEDODDS #############\n"));
        assert!(rendered.contains("API Term:\t\t\tTRIFECTA\n"));
        assert!(rendered.contains("Also known as:\t\t\tSupertripla\n"));
        assert_eq!(rendered.matches("#############\n").count(), glossary().len());
    }
}
