//! Prefecture to transport-bureau region, and address to Akabou surcharge area

use unchin_types::{FareError, Region};

const PREFECTURES: &[(Region, &[&str])] = &[
    (Region::Hokkaido, &["北海道"]),
    (
        Region::Tohoku,
        &["青森県", "岩手県", "宮城県", "秋田県", "山形県", "福島県"],
    ),
    (
        Region::Kanto,
        &[
            "茨城県", "栃木県", "群馬県", "埼玉県", "千葉県", "東京都", "神奈川県", "山梨県",
        ],
    ),
    (
        Region::HokurikuShinetsu,
        &["新潟県", "富山県", "石川県", "長野県"],
    ),
    (
        Region::Chubu,
        &["福井県", "岐阜県", "静岡県", "愛知県", "三重県"],
    ),
    (
        Region::Kinki,
        &["滋賀県", "京都府", "大阪府", "兵庫県", "奈良県", "和歌山県"],
    ),
    (
        Region::Chugoku,
        &["鳥取県", "島根県", "岡山県", "広島県", "山口県"],
    ),
    (Region::Shikoku, &["徳島県", "香川県", "愛媛県", "高知県"]),
    (
        Region::Kyushu,
        &[
            "福岡県", "佐賀県", "長崎県", "熊本県", "大分県", "宮崎県", "鹿児島県",
        ],
    ),
    (Region::Okinawa, &["沖縄県"]),
];

const TOKYO_WARDS: &[&str] = &[
    "千代田区", "中央区", "港区", "新宿区", "文京区", "台東区", "墨田区", "江東区",
    "品川区", "目黒区", "大田区", "世田谷区", "渋谷区", "中野区", "杉並区", "豊島区",
    "北区", "荒川区", "板橋区", "練馬区", "足立区", "葛飾区", "江戸川区",
];

pub const TOKYO_23_WARDS: &str = "東京23区";
pub const OSAKA_CITY: &str = "大阪市内";

/// Region of the bureau that covers `prefecture` (full name, e.g. 東京都)
pub fn resolve_region(prefecture: &str) -> Result<Region, FareError> {
    let prefecture = prefecture.trim();
    PREFECTURES
        .iter()
        .find(|(_, names)| names.contains(&prefecture))
        .map(|(region, _)| *region)
        .ok_or_else(|| FareError::invalid_input("prefecture", prefecture, "a prefecture name"))
}

/// Akabou surcharge area for an address, or "" outside the zones
pub fn resolve_akabou_area(address: &str) -> &'static str {
    if address.contains("東京都") && TOKYO_WARDS.iter().any(|ward| address.contains(ward)) {
        return TOKYO_23_WARDS;
    }
    if address.contains("大阪府") && address.contains("大阪市") {
        return OSAKA_CITY;
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_prefecture_resolves() {
        let count: usize = PREFECTURES.iter().map(|(_, names)| names.len()).sum();
        assert_eq!(count, 47);
        for (region, names) in PREFECTURES {
            for name in *names {
                assert_eq!(resolve_region(name).unwrap(), *region);
            }
        }
    }

    #[test]
    fn test_known_regions() {
        assert_eq!(resolve_region("東京都").unwrap(), Region::Kanto);
        assert_eq!(resolve_region("大阪府").unwrap(), Region::Kinki);
        assert_eq!(resolve_region(" 沖縄県 ").unwrap(), Region::Okinawa);
    }

    #[test]
    fn test_unknown_prefecture_is_invalid_input() {
        for name in ["", "東京", "Tokyo"] {
            let err = resolve_region(name).unwrap_err();
            assert!(err.is_invalid_input());
            assert!(err.to_string().contains("prefecture"));
        }
    }

    #[test]
    fn test_akabou_area() {
        assert_eq!(resolve_akabou_area("東京都新宿区西新宿2-8-1"), TOKYO_23_WARDS);
        assert_eq!(resolve_akabou_area("東京都八王子市元本郷町"), "");
        assert_eq!(resolve_akabou_area("大阪府大阪市北区中之島"), OSAKA_CITY);
        assert_eq!(resolve_akabou_area("大阪府堺市堺区"), "");
        assert_eq!(resolve_akabou_area("北海道札幌市中央区"), "");
        assert_eq!(resolve_akabou_area(""), "");
    }
}
