use cardstrike_core::{
    compare_hands, evaluate_hand, Card, DamageCalculator, HandCategory, Rank, Suit,
};
use std::cmp::Ordering;

fn parse(token: &str) -> Card {
    let (rank, suit) = token.split_at(token.len() - 1);
    let rank = match rank {
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "T" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        "A" => Rank::Ace,
        other => panic!("bad rank {other}"),
    };
    let suit = match suit {
        "h" => Suit::Hearts,
        "d" => Suit::Diamonds,
        "c" => Suit::Clubs,
        "s" => Suit::Spades,
        other => panic!("bad suit {other}"),
    };
    Card::standard(suit, rank)
}

fn cards(hand: &str) -> Vec<Card> {
    hand.split_whitespace().map(parse).collect()
}

macro_rules! hand_case {
    ($name:ident, $hand:expr, $category:expr, $tie:expr) => {
        #[test]
        fn $name() {
            let result = evaluate_hand(&cards($hand)).expect("valid hand");
            assert_eq!(result.category, $category);
            assert_eq!(result.tie_breakers, $tie);
        }
    };
}

hand_case!(royal_flush, "Th Jh Qh Kh Ah", HandCategory::RoyalFlush, vec![14]);
hand_case!(
    straight_flush,
    "9s Ks Qs Js Ts",
    HandCategory::StraightFlush,
    vec![13]
);
hand_case!(
    wheel_straight_flush,
    "Ad 2d 3d 4d 5d",
    HandCategory::StraightFlush,
    vec![5]
);
hand_case!(wheel_straight, "Ah 2c 3d 4s 5h", HandCategory::Straight, vec![5]);
hand_case!(
    broadway_straight,
    "Ts Jh Qd Kc Ah",
    HandCategory::Straight,
    vec![14]
);
hand_case!(
    quads_with_kicker,
    "9h 9d 9c 9s 2h",
    HandCategory::FourOfAKind,
    vec![9, 2]
);
hand_case!(quads_four_cards, "7h 7d 7c 7s", HandCategory::FourOfAKind, vec![7]);
hand_case!(
    full_house,
    "Kh Kd Kc 8s 8h",
    HandCategory::FullHouse,
    vec![13, 8]
);
hand_case!(
    full_house_low_triple,
    "8s 8h Kh Kd 8c",
    HandCategory::FullHouse,
    vec![8, 13]
);
hand_case!(
    flush,
    "2h 9h Jh 4h 7h",
    HandCategory::Flush,
    vec![11, 9, 7, 4, 2]
);
hand_case!(
    trips_alone,
    "Kh Kd Kc",
    HandCategory::ThreeOfAKind,
    vec![13]
);
hand_case!(
    trips_plus_single_is_not_full_house,
    "Kh Kd Kc 4s",
    HandCategory::ThreeOfAKind,
    vec![13, 4]
);
hand_case!(
    trips_with_kickers,
    "5h 5d Ac 5s Qh",
    HandCategory::ThreeOfAKind,
    vec![5, 14, 12]
);
hand_case!(
    two_pair,
    "4h Jd 4c Js 9h",
    HandCategory::TwoPair,
    vec![11, 4, 9]
);
hand_case!(
    two_pair_four_cards,
    "4h Jd 4c Js",
    HandCategory::TwoPair,
    vec![11, 4]
);
hand_case!(
    one_pair,
    "Ah Kd Ac Qs Jh",
    HandCategory::OnePair,
    vec![14, 13, 12, 11]
);
hand_case!(
    high_card,
    "2h 9d Jc 4s 7h",
    HandCategory::HighCard,
    vec![11, 9, 7, 4, 2]
);
hand_case!(single_card, "Qd", HandCategory::HighCard, vec![12]);
hand_case!(
    four_card_suited_run_is_not_flush_or_straight,
    "6h 7h 8h 9h",
    HandCategory::HighCard,
    vec![9, 8, 7, 6]
);
hand_case!(
    broken_run,
    "2h 3c 4d 5s 7h",
    HandCategory::HighCard,
    vec![7, 5, 4, 3, 2]
);

macro_rules! order_case {
    ($name:ident, $stronger:expr, $weaker:expr) => {
        #[test]
        fn $name() {
            let a = evaluate_hand(&cards($stronger)).expect("valid hand");
            let b = evaluate_hand(&cards($weaker)).expect("valid hand");
            assert_eq!(compare_hands(&a, &b), Ordering::Greater);
            assert_eq!(compare_hands(&b, &a), Ordering::Less);
        }
    };
}

order_case!(royal_beats_straight_flush, "Th Jh Qh Kh Ah", "9s Ks Qs Js Ts");
order_case!(straight_flush_beats_quads, "Ad 2d 3d 4d 5d", "Ah Ad Ac As Kh");
order_case!(quads_beat_full_house, "2h 2d 2c 2s 3h", "Ah Ad Ac Ks Kh");
order_case!(full_house_beats_flush, "2h 2d 2c 3s 3h", "Ah Kh Qh Jh 9h");
order_case!(flush_beats_straight, "2h 4h 6h 8h Th", "Ts Jh Qd Kc Ah");
order_case!(straight_beats_trips, "Ah 2c 3d 4s 5h", "Ah Ad Ac Ks Qh");
order_case!(trips_beat_two_pair, "2h 2d 2c", "Ah Ad Kc Ks Qh");
order_case!(two_pair_beats_pair, "3h 3d 2c 2s", "Ah Ad Kc Qs Jh");
order_case!(pair_beats_high_card, "2h 2d", "Ah Kd Qc Js 9h");
order_case!(six_high_straight_beats_wheel, "2h 3c 4d 5s 6h", "Ah 2c 3d 4s 5h");
order_case!(higher_kicker_wins, "Ah Ad Kc Qs Jh", "Ah Ad Kc Qs Th");
order_case!(higher_second_pair_wins, "Kh Kd 5c 5s 2h", "Kh Kd 4c 4s Ah");
order_case!(extra_card_breaks_high_card_tie, "Ah Kd 2c", "Ah Kd");

#[test]
fn same_cards_compare_equal() {
    for hand in ["Th Jh Qh Kh Ah", "Kh Kd Kc 8s 8h", "2h 9d Jc 4s 7h", "Qd"] {
        let a = evaluate_hand(&cards(hand)).expect("valid hand");
        let b = evaluate_hand(&cards(hand)).expect("valid hand");
        assert_eq!(compare_hands(&a, &b), Ordering::Equal);
    }
}

#[test]
fn suits_do_not_break_ties() {
    let a = evaluate_hand(&cards("Ah Kd Qc Js 9h")).expect("valid hand");
    let b = evaluate_hand(&cards("As Kc Qd Jh 9s")).expect("valid hand");
    assert_eq!(compare_hands(&a, &b), Ordering::Equal);
}

macro_rules! damage_case {
    ($name:ident, $hand:expr, $damage:expr) => {
        #[test]
        fn $name() {
            let played = cards($hand);
            let result = evaluate_hand(&played).expect("valid hand");
            assert_eq!(DamageCalculator::default().damage(&result, &played), $damage);
        }
    };
}

// 3 + 12 * 0.75
damage_case!(damage_ace_high, "Ah 9d 4c", 12);
// 20 + 9 + 2.75 + 2.5
damage_case!(damage_pair_of_aces, "Ah Ad Kc Qs Jh", 34);
// 35 + 9 * 0.75 + 2 * 0.25 + 7 * 0.25
damage_case!(damage_two_pair, "Jh Jd 4c 4s 9h", 44);
// 55 + 11 * 0.75
damage_case!(damage_trips, "Kh Kd Kc", 63);
// 75 + 3 * 0.75
damage_case!(damage_wheel, "Ah 2c 3d 4s 5h", 77);
// 90 + 9 * 0.75 + 7 * 0.25 + 5 * 0.25
damage_case!(damage_flush, "2h 9h Jh 4h 7h", 99);
// 125 + 11 * 0.75 + 6 * 0.25
damage_case!(damage_full_house, "Kh Kd Kc 8s 8h", 134);
// 160 + 7 * 0.75 + 0 * 0.25
damage_case!(damage_quads, "9h 9d 9c 9s 2h", 165);
// 250 + 11 * 0.75
damage_case!(damage_straight_flush, "9s Ks Qs Js Ts", 258);
// 500 + 12 * 0.75
damage_case!(damage_royal, "Th Jh Qh Kh Ah", 509);

#[test]
fn damage_rises_with_category() {
    let hands = [
        "2h 9d Jc 4s 7h",
        "2h 2d",
        "3h 3d 2c 2s",
        "2h 2d 2c",
        "Ah 2c 3d 4s 5h",
        "2h 4h 6h 8h Th",
        "2h 2d 2c 3s 3h",
        "2h 2d 2c 2s",
        "Ad 2d 3d 4d 5d",
        "Th Jh Qh Kh Ah",
    ];
    let calc = DamageCalculator::default();
    let damages: Vec<i64> = hands
        .iter()
        .map(|hand| {
            let played = cards(hand);
            let result = evaluate_hand(&played).expect("valid hand");
            calc.damage(&result, &played)
        })
        .collect();
    assert!(damages.windows(2).all(|w| w[0] < w[1]), "{damages:?}");
}
