//! Library summary computed for one lookup.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use steamstat_common::{format_hours, truncate_string, AppId};
use steamstat_steam::{OwnedGame, PlayerSummary, PriceQuote};

/// Number of titles listed in the report.
pub const TOP_TITLES: usize = 5;

/// Longest title or display name rendered, in characters.
pub const MAX_NAME_CHARS: usize = 64;

/// Label used when priced titles disagree on currency.
pub const MIXED_CURRENCIES: &str = "mixed currencies";

/// One of the most-played titles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopTitle {
    /// Display name
    pub name: String,
    /// Lifetime playtime
    pub minutes: u64,
    /// Known store price, if any
    pub price: Option<PriceQuote>,
}

/// Summary of a user's library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Profile display name
    pub display_name: String,
    /// Number of owned titles
    pub total_games: usize,
    /// Recorded playtime across the library
    pub total_minutes: u64,
    /// Sum of whole-unit prices of priced titles
    pub total_amount: u64,
    /// Currency of `total_amount`
    pub currency_label: String,
    /// Titles without a known price
    pub unknown_prices: usize,
    /// Most-played titles, longest first
    pub top: Vec<TopTitle>,
}

impl Report {
    /// Builds the report from a profile, its library, and one price per title.
    pub fn build(
        profile: &PlayerSummary,
        games: &[OwnedGame],
        prices: &[(AppId, PriceQuote)],
        default_currency_label: &str,
    ) -> Self {
        let known: HashMap<AppId, &PriceQuote> = prices
            .iter()
            .filter(|(_, quote)| quote.is_known())
            .map(|(id, quote)| (*id, quote))
            .collect();

        let top = top_titles(games, TOP_TITLES)
            .into_iter()
            .map(|game| TopTitle {
                name: game.display_name(),
                minutes: game.playtime_forever.unwrap_or_default(),
                price: known.get(&game.appid).map(|q| (*q).clone()),
            })
            .collect();

        let quotes: Vec<&PriceQuote> = prices.iter().map(|(_, q)| q).collect();

        Self {
            display_name: profile.personaname.clone(),
            total_games: games.len(),
            total_minutes: total_minutes(games),
            total_amount: quotes
                .iter()
                .filter_map(|q| q.amount())
                .fold(0, u64::saturating_add),
            currency_label: currency_label(&quotes, default_currency_label),
            unknown_prices: quotes.iter().filter(|q| !q.is_known()).count(),
            top,
        }
    }

    /// Renders the report as one chat message.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "User: {}", truncate_string(&self.display_name, MAX_NAME_CHARS));
        let _ = writeln!(out, "Total games: {}", self.total_games);
        let _ = writeln!(out, "Total hours played: {}", format_hours(self.total_minutes));
        let _ = writeln!(
            out,
            "Total library value: {} {}",
            self.total_amount, self.currency_label
        );
        if self.unknown_prices > 0 {
            let noun = if self.unknown_prices == 1 { "game" } else { "games" };
            let _ = writeln!(out, "Prices unknown for {} {noun}", self.unknown_prices);
        }

        out.push('\n');
        out.push_str("Top 5 games by playtime:");
        for title in &self.top {
            let _ = write!(
                out,
                "\n{}: {} hours",
                truncate_string(&title.name, MAX_NAME_CHARS),
                format_hours(title.minutes)
            );
            if let Some(price) = &title.price {
                let _ = write!(out, " ({price})");
            }
        }

        out
    }
}

/// Most-played titles among those with recorded playtime.
///
/// Sorted by descending playtime; equal playtimes keep library order.
pub fn top_titles(games: &[OwnedGame], n: usize) -> Vec<&OwnedGame> {
    let mut played: Vec<&OwnedGame> = games
        .iter()
        .filter(|g| g.playtime_forever.is_some())
        .collect();
    // sort_by is stable
    played.sort_by(|a, b| b.playtime_forever.cmp(&a.playtime_forever));
    played.truncate(n);
    played
}

/// Sum of recorded playtime in minutes.
pub fn total_minutes(games: &[OwnedGame]) -> u64 {
    games
        .iter()
        .filter_map(|g| g.playtime_forever)
        .fold(0, u64::saturating_add)
}

/// Currency label for the library total.
pub fn currency_label(quotes: &[&PriceQuote], default_label: &str) -> String {
    let currencies: BTreeSet<&str> = quotes.iter().filter_map(|q| q.currency()).collect();
    let mut iter = currencies.into_iter();
    match (iter.next(), iter.next()) {
        (None, _) => default_label.to_string(),
        (Some(only), None) => only.to_string(),
        (Some(_), Some(_)) => MIXED_CURRENCIES.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MAX_MESSAGE_CHARS;
    use proptest::prelude::*;

    fn game(appid: u32, name: &str, minutes: Option<u64>) -> OwnedGame {
        OwnedGame {
            appid: AppId(appid),
            name: Some(name.to_string()),
            playtime_forever: minutes,
        }
    }

    fn profile(name: &str) -> PlayerSummary {
        PlayerSummary {
            steamid: "76561198064159857".to_string(),
            personaname: name.to_string(),
            profileurl: None,
            avatarfull: None,
            communityvisibilitystate: Some(3),
            realname: None,
            loccountrycode: None,
        }
    }

    fn priced(formatted: &str, currency: &str) -> PriceQuote {
        PriceQuote::Priced {
            formatted: formatted.to_string(),
            currency: Some(currency.to_string()),
        }
    }

    #[test]
    fn test_top_titles_stable_ordering() {
        let playtimes = [10, 50, 5, 100, 20, 100, 0];
        let games: Vec<OwnedGame> = playtimes
            .iter()
            .enumerate()
            .map(|(i, m)| game(u32::try_from(i).unwrap(), &format!("g{i}"), Some(*m)))
            .collect();

        let top: Vec<(u64, AppId)> = top_titles(&games, 5)
            .iter()
            .map(|g| (g.playtime_forever.unwrap(), g.appid))
            .collect();

        assert_eq!(
            top,
            vec![
                (100, AppId(3)),
                (100, AppId(5)),
                (50, AppId(1)),
                (20, AppId(4)),
                (10, AppId(0)),
            ]
        );
    }

    #[test]
    fn test_top_titles_skips_unrecorded_playtime() {
        let games = vec![game(1, "a", None), game(2, "b", Some(0)), game(3, "c", None)];
        let top = top_titles(&games, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].appid, AppId(2));
    }

    #[test]
    fn test_total_minutes() {
        let games = vec![game(1, "a", Some(400)), game(2, "b", None), game(3, "c", Some(200))];
        assert_eq!(total_minutes(&games), 600);
        assert_eq!(format_hours(total_minutes(&games)), "10.00");
    }

    #[test]
    fn test_currency_label() {
        let rub = priced("1 руб.", "RUB");
        let usd = priced("$1", "USD");
        assert_eq!(currency_label(&[&rub, &PriceQuote::Free], "XXX"), "RUB");
        assert_eq!(currency_label(&[&rub, &usd], "XXX"), MIXED_CURRENCIES);
        assert_eq!(currency_label(&[&PriceQuote::Unknown], "RUB"), "RUB");
        assert_eq!(currency_label(&[], "RUB"), "RUB");
    }

    #[test]
    fn test_build_and_render() {
        let games = vec![
            game(10, "Dota 2", Some(600)),
            game(20, "Portal 2", Some(90)),
            game(30, "Delisted", Some(30)),
            game(40, "Never Played", None),
        ];
        let prices = vec![
            (AppId(10), PriceQuote::Free),
            (AppId(20), priced("1 234 руб.", "RUB")),
            (AppId(30), PriceQuote::Unknown),
            (AppId(40), priced("399 руб.", "RUB")),
        ];

        let report = Report::build(&profile("Alice"), &games, &prices, "RUB");
        assert_eq!(report.total_games, 4);
        assert_eq!(report.total_minutes, 720);
        assert_eq!(report.total_amount, 1633);
        assert_eq!(report.unknown_prices, 1);

        let expected = "User: Alice\n\
                        Total games: 4\n\
                        Total hours played: 12.00\n\
                        Total library value: 1633 RUB\n\
                        Prices unknown for 1 game\n\
                        \n\
                        Top 5 games by playtime:\n\
                        Dota 2: 10.00 hours (Free)\n\
                        Portal 2: 1.50 hours (1 234 руб.)\n\
                        Delisted: 0.50 hours";
        assert_eq!(report.render(), expected);
    }

    #[test]
    fn test_render_without_unknown_prices() {
        let games = vec![game(10, "Dota 2", Some(60))];
        let prices = vec![(AppId(10), PriceQuote::Free)];

        let rendered = Report::build(&profile("Bob"), &games, &prices, "RUB").render();
        assert!(!rendered.contains("Prices unknown"));
        assert!(rendered.contains("Total library value: 0 RUB"));
    }

    #[test]
    fn test_render_unknown_price_count_plural() {
        let games = vec![game(10, "A", Some(60)), game(20, "B", Some(30))];
        let prices = vec![(AppId(10), PriceQuote::Unknown), (AppId(20), PriceQuote::Unknown)];

        let rendered = Report::build(&profile("Bob"), &games, &prices, "RUB").render();
        assert!(rendered.contains("Prices unknown for 2 games\n"));
    }

    #[test]
    fn test_render_fits_in_one_message() {
        let long = "X".repeat(500);
        let games: Vec<OwnedGame> = (0..5).map(|i| game(i, &long, Some(u64::MAX / 10))).collect();
        let prices: Vec<(AppId, PriceQuote)> = (0..5)
            .map(|i| (AppId(i), priced(&"9".repeat(100), "RUB")))
            .collect();

        let rendered = Report::build(&profile(&long), &games, &prices, "RUB").render();
        assert!(rendered.chars().count() <= MAX_MESSAGE_CHARS);
    }

    proptest! {
        #[test]
        fn test_property_top_titles_sorted_and_bounded(
            playtimes in proptest::collection::vec(proptest::option::of(0u64..10_000), 0..40)
        ) {
            let games: Vec<OwnedGame> = playtimes
                .iter()
                .enumerate()
                .map(|(i, m)| game(u32::try_from(i).unwrap(), "g", *m))
                .collect();

            let top = top_titles(&games, TOP_TITLES);
            let recorded = playtimes.iter().filter(|m| m.is_some()).count();

            prop_assert_eq!(top.len(), recorded.min(TOP_TITLES));
            for pair in top.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.playtime_forever >= b.playtime_forever);
                if a.playtime_forever == b.playtime_forever {
                    prop_assert!(a.appid < b.appid);
                }
            }
        }
    }
}
