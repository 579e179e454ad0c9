/// Property-based tests for the hand evaluator using proptest
///
/// The seven-card evaluator is checked against a brute force over every
/// five-card subset, plus ordering facts that hold for any hand.
use holdem_odds::{evaluate, Card, HandCategory, HandRank};
use proptest::prelude::*;

// Strategy to generate `n` distinct cards in random order
fn unique_cards_strategy(n: usize) -> impl Strategy<Value = Vec<Card>> {
    let ids: Vec<u8> = (0..52).collect();
    proptest::sample::subsequence(ids, n)
        .prop_shuffle()
        .prop_map(|ids| ids.into_iter().filter_map(Card::from_id).collect())
}

// Best hand over all 5-card subsets
fn brute_force(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank::default();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.max(evaluate(&five).unwrap());
                    }
                }
            }
        }
    }
    best
}

proptest! {
    #[test]
    fn test_seven_cards_match_best_subset(cards in unique_cards_strategy(7)) {
        let fast = evaluate(&cards).unwrap();
        prop_assert_eq!(fast, brute_force(&cards), "cards: {:?}", cards);
    }

    #[test]
    fn test_six_cards_match_best_subset(cards in unique_cards_strategy(6)) {
        prop_assert_eq!(evaluate(&cards).unwrap(), brute_force(&cards));
    }

    #[test]
    fn test_order_does_not_matter(cards in unique_cards_strategy(7)) {
        let mut sorted = cards.clone();
        sorted.sort();
        let mut reversed = sorted.clone();
        reversed.reverse();
        let rank = evaluate(&cards).unwrap();
        prop_assert_eq!(rank, evaluate(&sorted).unwrap());
        prop_assert_eq!(rank, evaluate(&reversed).unwrap());
    }

    #[test]
    fn test_more_cards_never_worse(cards in unique_cards_strategy(7)) {
        let five = evaluate(&cards[..5]).unwrap();
        let six = evaluate(&cards[..6]).unwrap();
        let seven = evaluate(&cards).unwrap();
        prop_assert!(five <= six);
        prop_assert!(six <= seven);
    }

    #[test]
    fn test_category_matches_value(cards in unique_cards_strategy(7)) {
        let rank = evaluate(&cards).unwrap();
        prop_assert_eq!(rank.value() >> 20, rank.category() as u32);
        let ranks = rank.ranks();
        prop_assert!(!ranks.is_empty() && ranks.len() <= 5);
        prop_assert!(ranks.iter().all(|r| (2..=14).contains(r)));
    }

    #[test]
    fn test_flush_category_needs_five_suited(cards in unique_cards_strategy(7)) {
        let rank = evaluate(&cards).unwrap();
        let max_suited = holdem_odds::Suit::ALL
            .iter()
            .map(|&s| cards.iter().filter(|c| c.suit() == s).count())
            .max()
            .unwrap_or(0);
        let flushy = matches!(rank.category(), HandCategory::Flush | HandCategory::StraightFlush);
        if flushy {
            prop_assert!(max_suited >= 5);
        }
        if max_suited >= 5 {
            prop_assert!(rank.category() >= HandCategory::Flush);
        }
    }
}
