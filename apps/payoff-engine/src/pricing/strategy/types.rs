//! Strategy catalog.
//!
//! Fixed reference data for every supported strategy: how many legs it takes,
//! the role of each positional leg, and whether it includes a stock position.
//! The positional order here is the order of the `strikes`/`premiums`/`kinds`
//! arrays at the API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PayoffError;
use crate::options::{LegDirection, OptionType};

/// Type of options strategy.
///
/// Serializes as snake case; deserializes from any form [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum StrategyType {
    /// Long Call (bullish).
    LongCall,
    /// Long Put (bearish).
    LongPut,
    /// Covered Call: long stock, short call.
    CoveredCall,
    /// Protective Put: long stock, long put.
    ProtectivePut,
    /// Iron Condor (neutral strategy).
    IronCondor,
    /// Bull Put Spread (bullish).
    BullPutSpread,
    /// Bear Call Spread (bearish).
    BearCallSpread,
    /// Long Straddle (volatility play).
    LongStraddle,
    /// Short Straddle (neutral).
    ShortStraddle,
    /// Long Strangle (volatility play).
    LongStrangle,
    /// Short Strangle (neutral).
    ShortStrangle,
    /// Call Butterfly (neutral).
    ButterflySpread,
    /// Iron Butterfly (neutral).
    IronButterfly,
    /// Collar: long stock, long put, short call.
    Collar,
}

/// Market view a strategy expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    /// Profits when the underlying rises.
    Bullish,
    /// Profits when the underlying falls.
    Bearish,
    /// Profits when the underlying stays in a range.
    Neutral,
    /// Profits from a large move in either direction.
    Volatile,
}

/// Role of one positional leg in a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegRole {
    /// Long or short.
    pub direction: LegDirection,
    /// Call or put.
    pub kind: OptionType,
    /// Number of contracts relative to the other legs.
    pub ratio: u32,
    /// Human-readable role label.
    pub label: &'static str,
}

impl LegRole {
    const fn new(
        direction: LegDirection,
        kind: OptionType,
        ratio: u32,
        label: &'static str,
    ) -> Self {
        Self {
            direction,
            kind,
            ratio,
            label,
        }
    }
}

use LegDirection::{Long, Short};
use OptionType::{Call, Put};

static LONG_CALL: [LegRole; 1] = [LegRole::new(Long, Call, 1, "long call")];
static LONG_PUT: [LegRole; 1] = [LegRole::new(Long, Put, 1, "long put")];
static COVERED_CALL: [LegRole; 1] = [LegRole::new(Short, Call, 1, "short call")];
static PROTECTIVE_PUT: [LegRole; 1] = [LegRole::new(Long, Put, 1, "long put")];
static IRON_CONDOR: [LegRole; 4] = [
    LegRole::new(Short, Call, 1, "short call"),
    LegRole::new(Long, Call, 1, "long call"),
    LegRole::new(Short, Put, 1, "short put"),
    LegRole::new(Long, Put, 1, "long put"),
];
static BULL_PUT_SPREAD: [LegRole; 2] = [
    LegRole::new(Short, Put, 1, "short put"),
    LegRole::new(Long, Put, 1, "long put"),
];
static BEAR_CALL_SPREAD: [LegRole; 2] = [
    LegRole::new(Short, Call, 1, "short call"),
    LegRole::new(Long, Call, 1, "long call"),
];
static LONG_CALL_PUT: [LegRole; 2] = [
    LegRole::new(Long, Call, 1, "long call"),
    LegRole::new(Long, Put, 1, "long put"),
];
static SHORT_CALL_PUT: [LegRole; 2] = [
    LegRole::new(Short, Call, 1, "short call"),
    LegRole::new(Short, Put, 1, "short put"),
];
static BUTTERFLY_SPREAD: [LegRole; 3] = [
    LegRole::new(Long, Call, 1, "long ITM call"),
    LegRole::new(Short, Call, 2, "short ATM call"),
    LegRole::new(Long, Call, 1, "long OTM call"),
];
static IRON_BUTTERFLY: [LegRole; 4] = [
    LegRole::new(Long, Put, 1, "long put"),
    LegRole::new(Short, Put, 1, "short put"),
    LegRole::new(Short, Call, 1, "short call"),
    LegRole::new(Long, Call, 1, "long call"),
];
static COLLAR: [LegRole; 2] = [
    LegRole::new(Long, Put, 1, "long put"),
    LegRole::new(Short, Call, 1, "short call"),
];

impl StrategyType {
    /// Every strategy in catalog order.
    pub const ALL: [Self; 14] = [
        Self::LongCall,
        Self::LongPut,
        Self::CoveredCall,
        Self::ProtectivePut,
        Self::IronCondor,
        Self::BullPutSpread,
        Self::BearCallSpread,
        Self::LongStraddle,
        Self::ShortStraddle,
        Self::LongStrangle,
        Self::ShortStrangle,
        Self::ButterflySpread,
        Self::IronButterfly,
        Self::Collar,
    ];

    /// Positional leg roles.
    #[must_use]
    pub fn leg_roles(&self) -> &'static [LegRole] {
        match self {
            Self::LongCall => &LONG_CALL,
            Self::LongPut => &LONG_PUT,
            Self::CoveredCall => &COVERED_CALL,
            Self::ProtectivePut => &PROTECTIVE_PUT,
            Self::IronCondor => &IRON_CONDOR,
            Self::BullPutSpread => &BULL_PUT_SPREAD,
            Self::BearCallSpread => &BEAR_CALL_SPREAD,
            Self::LongStraddle | Self::LongStrangle => &LONG_CALL_PUT,
            Self::ShortStraddle | Self::ShortStrangle => &SHORT_CALL_PUT,
            Self::ButterflySpread => &BUTTERFLY_SPREAD,
            Self::IronButterfly => &IRON_BUTTERFLY,
            Self::Collar => &COLLAR,
        }
    }

    /// Number of option legs (strikes/premiums) the strategy takes.
    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.leg_roles().len()
    }

    /// Option type expected at each position.
    pub fn leg_kinds(self) -> impl Iterator<Item = OptionType> {
        self.leg_roles().iter().map(|role| role.kind)
    }

    /// Whether the strategy includes a stock position priced at the average holding price.
    #[must_use]
    pub const fn requires_average_price(&self) -> bool {
        matches!(self, Self::CoveredCall | Self::ProtectivePut | Self::Collar)
    }

    /// Market view the strategy expresses.
    #[must_use]
    pub const fn outlook(&self) -> Outlook {
        match self {
            Self::LongCall | Self::CoveredCall | Self::ProtectivePut | Self::BullPutSpread => {
                Outlook::Bullish
            }
            Self::LongPut | Self::BearCallSpread => Outlook::Bearish,
            Self::LongStraddle | Self::LongStrangle => Outlook::Volatile,
            Self::IronCondor
            | Self::ShortStraddle
            | Self::ShortStrangle
            | Self::ButterflySpread
            | Self::IronButterfly
            | Self::Collar => Outlook::Neutral,
        }
    }

    /// Display name, as used in strategy pickers.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::LongCall => "Long Call",
            Self::LongPut => "Long Put",
            Self::CoveredCall => "Covered Call",
            Self::ProtectivePut => "Protective Put",
            Self::IronCondor => "Iron Condor",
            Self::BullPutSpread => "Bull Put Spread",
            Self::BearCallSpread => "Bear Call Spread",
            Self::LongStraddle => "Long Straddle",
            Self::ShortStraddle => "Short Straddle",
            Self::LongStrangle => "Long Strangle",
            Self::ShortStrangle => "Short Strangle",
            Self::ButterflySpread => "Butterfly Spread",
            Self::IronButterfly => "Iron Butterfly",
            Self::Collar => "Collar",
        }
    }
}

impl fmt::Display for StrategyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StrategyType {
    type Err = PayoffError;

    /// Accepts display names ("Iron Condor"), snake case and kebab case, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '_' | '-' => ' ',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        Self::ALL
            .into_iter()
            .find(|strategy| strategy.display_name().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| PayoffError::UnknownStrategy {
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for StrategyType {
    type Error = PayoffError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(StrategyType::LongCall, 1)]
    #[test_case(StrategyType::LongPut, 1)]
    #[test_case(StrategyType::CoveredCall, 1)]
    #[test_case(StrategyType::ProtectivePut, 1)]
    #[test_case(StrategyType::IronCondor, 4)]
    #[test_case(StrategyType::BullPutSpread, 2)]
    #[test_case(StrategyType::BearCallSpread, 2)]
    #[test_case(StrategyType::LongStraddle, 2)]
    #[test_case(StrategyType::ShortStraddle, 2)]
    #[test_case(StrategyType::LongStrangle, 2)]
    #[test_case(StrategyType::ShortStrangle, 2)]
    #[test_case(StrategyType::ButterflySpread, 3)]
    #[test_case(StrategyType::IronButterfly, 4)]
    #[test_case(StrategyType::Collar, 2)]
    fn test_leg_count(strategy: StrategyType, expected: usize) {
        assert_eq!(strategy.leg_count(), expected);
    }

    #[test]
    fn test_requires_average_price() {
        let stock_linked: Vec<_> = StrategyType::ALL
            .into_iter()
            .filter(StrategyType::requires_average_price)
            .collect();
        assert_eq!(
            stock_linked,
            vec![
                StrategyType::CoveredCall,
                StrategyType::ProtectivePut,
                StrategyType::Collar
            ]
        );
    }

    #[test]
    fn test_iron_condor_roles() {
        let roles = StrategyType::IronCondor.leg_roles();
        assert_eq!(roles[0].direction, LegDirection::Short);
        assert_eq!(roles[0].kind, OptionType::Call);
        assert_eq!(roles[1].direction, LegDirection::Long);
        assert_eq!(roles[1].kind, OptionType::Call);
        assert_eq!(roles[2].direction, LegDirection::Short);
        assert_eq!(roles[2].kind, OptionType::Put);
        assert_eq!(roles[3].direction, LegDirection::Long);
        assert_eq!(roles[3].kind, OptionType::Put);
    }

    #[test]
    fn test_butterfly_body_ratio() {
        let ratios: Vec<u32> = StrategyType::ButterflySpread
            .leg_roles()
            .iter()
            .map(|r| r.ratio)
            .collect();
        assert_eq!(ratios, vec![1, 2, 1]);
    }

    #[test]
    fn test_leg_kinds() {
        let kinds: Vec<_> = StrategyType::Collar.leg_kinds().collect();
        assert_eq!(kinds, vec![OptionType::Put, OptionType::Call]);
    }

    #[test_case("Iron Condor", StrategyType::IronCondor)]
    #[test_case("iron_condor", StrategyType::IronCondor)]
    #[test_case("bull-put-spread", StrategyType::BullPutSpread)]
    #[test_case("  LONG   call ", StrategyType::LongCall)]
    #[test_case("Collar", StrategyType::Collar)]
    fn test_parse(name: &str, expected: StrategyType) {
        assert_eq!(name.parse::<StrategyType>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Jade Lizard".parse::<StrategyType>().unwrap_err();
        assert_eq!(
            err,
            PayoffError::UnknownStrategy {
                name: "Jade Lizard".to_string()
            }
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for strategy in StrategyType::ALL {
            assert_eq!(strategy.to_string().parse::<StrategyType>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_outlook() {
        assert_eq!(StrategyType::BullPutSpread.outlook(), Outlook::Bullish);
        assert_eq!(StrategyType::BearCallSpread.outlook(), Outlook::Bearish);
        assert_eq!(StrategyType::LongStrangle.outlook(), Outlook::Volatile);
        assert_eq!(StrategyType::IronButterfly.outlook(), Outlook::Neutral);
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&StrategyType::IronButterfly).unwrap();
        assert_eq!(json, "\"iron_butterfly\"");

        let parsed: StrategyType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StrategyType::IronButterfly);

        let parsed: StrategyType = serde_json::from_str("\"Bear Call Spread\"").unwrap();
        assert_eq!(parsed, StrategyType::BearCallSpread);

        let err = serde_json::from_str::<StrategyType>("\"Jade Lizard\"").unwrap_err();
        assert!(err.to_string().contains("Unknown strategy: Jade Lizard"));
    }
}
