use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::str::FromStr;

use super::dice::DiceError;

/// 博饼名次，判定优先级由高到低排列。
///
/// 判别值即 [`RANKS`] 中的下标（权重），`as u8` 可直接取得。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "ZJ_IN_FLOWER")]
    ZhuangyuanChaJinhua = 0,
    #[serde(rename = "SIX_RED")]
    SixRed = 1,
    #[serde(rename = "SIX_BLACK")]
    SixBlack = 2,
    #[serde(rename = "FIVE_KINGS")]
    FiveKings = 3,
    #[serde(rename = "FIVE_TWOS_WITH_ONE_FOUR")]
    FiveTwosWithOneFour = 4,
    #[serde(rename = "FIVE_TWOS")]
    FiveTwos = 5,
    #[serde(rename = "ZHUANGYUAN")]
    Zhuangyuan = 6,
    #[serde(rename = "BANGYAN")]
    Bangyan = 7,
    #[serde(rename = "TANHUA")]
    Tanhua = 8,
    #[serde(rename = "JINSHI")]
    Jinshi = 9,
    #[serde(rename = "JUREN")]
    Juren = 10,
    #[serde(rename = "XIUCAI")]
    Xiucai = 11,
    #[serde(rename = "NONE")]
    NoRank = 12,
}

/// 名次表中的一项。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RankInfo {
    pub rank: Rank,
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const RANK_COUNT: usize = 13;

/// 名次总表，顺序即权重（0 最大，12 为"无"）。
pub static RANKS: [RankInfo; RANK_COUNT] = [
    RankInfo {
        rank: Rank::ZhuangyuanChaJinhua,
        key: "ZJ_IN_FLOWER",
        label: "状元插金花",
        description: "四个4 + 两个1",
    },
    RankInfo {
        rank: Rank::SixRed,
        key: "SIX_RED",
        label: "六杯红",
        description: "六个4",
    },
    RankInfo {
        rank: Rank::SixBlack,
        key: "SIX_BLACK",
        label: "六杯黑",
        description: "六个2",
    },
    RankInfo {
        rank: Rank::FiveKings,
        key: "FIVE_KINGS",
        label: "五王",
        description: "五个4",
    },
    RankInfo {
        rank: Rank::FiveTwosWithOneFour,
        key: "FIVE_TWOS_WITH_ONE_FOUR",
        label: "五子带一秀",
        description: "五个2 + 一个4",
    },
    RankInfo {
        rank: Rank::FiveTwos,
        key: "FIVE_TWOS",
        label: "五子登科",
        description: "五个2",
    },
    RankInfo {
        rank: Rank::Zhuangyuan,
        key: "ZHUANGYUAN",
        label: "状元",
        description: "四个4",
    },
    RankInfo {
        rank: Rank::Bangyan,
        key: "BANGYAN",
        label: "榜眼（对堂）",
        description: "1 到 6 各一个",
    },
    RankInfo {
        rank: Rank::Tanhua,
        key: "TANHUA",
        label: "探花（三红）",
        description: "三个4",
    },
    RankInfo {
        rank: Rank::Jinshi,
        key: "JINSHI",
        label: "进士（四进）",
        description: "任意四个同点",
    },
    RankInfo {
        rank: Rank::Juren,
        key: "JUREN",
        label: "举人（二举）",
        description: "两个4",
    },
    RankInfo {
        rank: Rank::Xiucai,
        key: "XIUCAI",
        label: "秀才（一秀）",
        description: "一个4",
    },
    RankInfo {
        rank: Rank::NoRank,
        key: "NONE",
        label: "无",
        description: "不成名次",
    },
];

// 旧版前端输出的"秀才"标签右括号是半角。
const LEGACY_XIUCAI_LABEL: &str = "秀才（一秀)";

static LABEL_INDEX: Lazy<HashMap<&'static str, Rank>> = Lazy::new(|| {
    let mut index: HashMap<&'static str, Rank> =
        RANKS.iter().map(|info| (info.label, info.rank)).collect();
    index.insert(LEGACY_XIUCAI_LABEL, Rank::Xiucai);
    index
});

impl Rank {
    /// 按优先级从高到低列出全部名次。
    pub fn all() -> impl Iterator<Item = Rank> {
        RANKS.iter().map(|info| info.rank)
    }

    pub fn info(self) -> &'static RankInfo {
        &RANKS[self.weight() as usize]
    }

    /// 名次在总表中的位置，越小越大。
    pub fn weight(self) -> u8 {
        self as u8
    }

    pub fn from_weight(weight: u8) -> Option<Rank> {
        RANKS.get(weight as usize).map(|info| info.rank)
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn key(self) -> &'static str {
        self.info().key
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    pub fn from_label(label: &str) -> Option<Rank> {
        LABEL_INDEX.get(label).copied()
    }

    pub fn from_key(key: &str) -> Option<Rank> {
        RANKS
            .iter()
            .find(|info| info.key == key)
            .map(|info| info.rank)
    }

    /// `self` 是否压过 `other`。
    pub fn outranks(self, other: Rank) -> bool {
        self.weight() < other.weight()
    }
}

/// `{ KEY: 标签 }` 映射，按名次表顺序序列化。
#[derive(Debug, Clone, Copy, Default)]
pub struct RankLabels;

impl Serialize for RankLabels {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(RANKS.iter().map(|info| (info.key, info.label)))
    }
}

/// 按标签查权重，未知标签返回 `None`（不是"最低名次"）。
pub fn rank_weight(label: &str) -> Option<u8> {
    Rank::from_label(label).map(Rank::weight)
}

impl Ord for Rank {
    /// 名次越大比较结果越大，即权重反序。
    fn cmp(&self, other: &Self) -> Ordering {
        other.weight().cmp(&self.weight())
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = DiceError;

    /// 接受中文标签或英文键名。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rank::from_label(s)
            .or_else(|| Rank::from_key(s))
            .ok_or_else(|| DiceError::UnknownRank {
                label: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminant_matches_table_position() {
        for (index, info) in RANKS.iter().enumerate() {
            assert_eq!(
                info.rank.weight() as usize,
                index,
                "{} should sit at its own weight",
                info.label
            );
        }
        assert_eq!(Rank::all().count(), RANK_COUNT);
    }

    #[test]
    fn weight_is_strictly_monotonic_with_table_order() {
        let ranks: Vec<Rank> = Rank::all().collect();
        for (i, a) in ranks.iter().enumerate() {
            for (j, b) in ranks.iter().enumerate() {
                assert_eq!(a.weight() < b.weight(), i < j);
                assert_eq!(a.outranks(*b), i < j);
                assert_eq!(a > b, i < j, "stronger rank should compare greater");
            }
        }
    }

    #[test]
    fn labels_and_keys_resolve_back_to_rank() {
        for info in RANKS.iter() {
            assert_eq!(Rank::from_label(info.label), Some(info.rank));
            assert_eq!(Rank::from_key(info.key), Some(info.rank));
            assert_eq!(info.label.parse::<Rank>().ok(), Some(info.rank));
            assert_eq!(info.rank.to_string(), info.label);
        }
    }

    #[test]
    fn legacy_xiucai_label_is_accepted() {
        assert_eq!(Rank::from_label("秀才（一秀)"), Some(Rank::Xiucai));
        assert_eq!(rank_weight("秀才（一秀)"), Some(11));
    }

    #[test]
    fn unknown_label_has_no_weight() {
        assert_eq!(rank_weight("探花"), None);
        assert_eq!(rank_weight(""), None);
        let error = "大满贯".parse::<Rank>().expect_err("unknown label should fail");
        assert_eq!(
            error,
            DiceError::UnknownRank {
                label: "大满贯".to_string()
            }
        );
    }

    #[test]
    fn known_weights() {
        assert_eq!(rank_weight("状元插金花"), Some(0));
        assert_eq!(rank_weight("六杯红"), Some(1));
        assert_eq!(rank_weight("榜眼（对堂）"), Some(7));
        assert_eq!(rank_weight("无"), Some(12));
        assert_eq!(Rank::from_weight(9), Some(Rank::Jinshi));
        assert_eq!(Rank::from_weight(13), None);
    }

    #[test]
    fn keys_match_exactly_like_serde() {
        assert_eq!(Rank::from_key("SIX_RED"), Some(Rank::SixRed));
        assert_eq!(Rank::from_key("six_red"), None);
        assert!("six_red".parse::<Rank>().is_err());
        assert!(serde_json::from_str::<Rank>("\"six_red\"").is_err());
    }

    #[test]
    fn rank_labels_keep_table_order() {
        let json = serde_json::to_string(&RankLabels).expect("serialize labels");
        let positions: Vec<usize> = RANKS
            .iter()
            .map(|info| {
                json.find(&format!("\"{}\":\"{}\"", info.key, info.label))
                    .expect("every key should be present with its label")
            })
            .collect();
        assert!(
            positions.windows(2).all(|pair| pair[0] < pair[1]),
            "keys should follow weight order: {json}"
        );
        assert!(json.starts_with("{\"ZJ_IN_FLOWER\""));
    }

    #[test]
    fn serializes_as_legacy_key() {
        let json = serde_json::to_string(&Rank::FiveTwosWithOneFour).expect("serialize rank");
        assert_eq!(json, "\"FIVE_TWOS_WITH_ONE_FOUR\"");
        let rank: Rank = serde_json::from_str("\"NONE\"").expect("deserialize rank");
        assert_eq!(rank, Rank::NoRank);
    }
}
