use rand::seq::SliceRandom;
use rand::Rng;

use crate::card::{Character, CHARACTER_VARIANTS};
use crate::rules::DECK_SIZE;

/// The court deck: an ordered pool of role cards. Draws come off the front,
/// returned cards go on the back and must be followed by a shuffle.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    cards: Vec<Character>,
}

impl Deck {
    /// Three of each character, unshuffled. Shuffle before dealing.
    pub fn standard() -> Self {
        let cards = CHARACTER_VARIANTS
            .iter()
            .flat_map(|&card| std::iter::repeat(card).take(3))
            .collect::<Vec<Character>>();

        debug_assert_eq!(cards.len(), DECK_SIZE);

        Self { cards }
    }

    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Character> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    pub fn return_card(&mut self, card: Character) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn standard_deck_has_three_of_each() {
        let mut deck = Deck::standard();
        assert_eq!(deck.len(), DECK_SIZE);

        let mut counts = std::collections::HashMap::new();
        while let Some(card) = deck.draw() {
            *counts.entry(card).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 5);
        assert!(counts.values().all(|&n| n == 3));
    }

    #[test]
    fn draw_comes_off_the_front() {
        let mut deck = Deck::standard();
        let first = deck.cards[0];
        assert_eq!(deck.draw(), Some(first));
        assert_eq!(deck.len(), DECK_SIZE - 1);
    }

    #[test]
    fn returned_card_goes_on_the_back() {
        let mut deck = Deck::standard();
        deck.return_card(Character::Contessa);
        assert_eq!(deck.cards.last(), Some(&Character::Contessa));
        assert_eq!(deck.len(), DECK_SIZE + 1);
    }

    #[test]
    fn draw_from_empty_deck() {
        let mut deck = Deck::standard();
        for _ in 0..DECK_SIZE {
            assert!(deck.draw().is_some());
        }
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn same_seed_same_order() {
        let mut a = Deck::standard();
        let mut b = Deck::standard();

        a.shuffle(&mut Pcg64Mcg::seed_from_u64(99));
        b.shuffle(&mut Pcg64Mcg::seed_from_u64(99));

        assert_eq!(a, b);
    }
}
