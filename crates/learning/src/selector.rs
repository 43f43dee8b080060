//! Word selection for a new study session.
//!
//! Words are drawn from three priority buckets: due-for-review words take
//! about 60% of the slots, new words about 40%, and mastered words only fill
//! what is left.

use std::collections::HashSet;

use chrono::Utc;
use lexis_core::{Time, Word, WordId, WordStatus};
use rand::seq::SliceRandom;
use rand::Rng;

/// Share of the session reserved for words due for review.
const CRITICAL_SHARE: f64 = 0.6;

/// Share of the session reserved for new words.
const NEW_SHARE: f64 = 0.4;

/// Select up to `count` words for the next article, using the current time
/// and the thread-local RNG.
pub fn select_words_for_article(all_words: &[Word], count: usize) -> Vec<Word> {
    select_words_with(all_words, count, Utc::now(), &mut rand::thread_rng())
}

/// Select up to `count` words as of `now`, shuffling with `rng`.
///
/// The result never contains the same word twice. Ordering inside the result
/// only reflects which bucket a word came from.
pub fn select_words_with<R: Rng + ?Sized>(
    all_words: &[Word],
    count: usize,
    now: Time,
    rng: &mut R,
) -> Vec<Word> {
    if count == 0 || all_words.is_empty() {
        return Vec::new();
    }

    let critical: Vec<&Word> = all_words
        .iter()
        .filter(|w| w.status != WordStatus::Mastered && w.is_due(now))
        .collect();
    let new: Vec<&Word> = all_words
        .iter()
        .filter(|w| w.status == WordStatus::New)
        .collect();
    let mastered: Vec<&Word> = all_words
        .iter()
        .filter(|w| w.status == WordStatus::Mastered)
        .collect();

    let critical_quota = quota(count, CRITICAL_SHARE).min(critical.len());
    let new_quota = quota(count, NEW_SHARE)
        .min(new.len())
        .min(count - critical_quota);

    let critical = shuffled(critical, rng);
    let new = shuffled(new, rng);

    let mut picker = Picker::new(count);
    picker.take(&critical, critical_quota);
    picker.take(&new, new_quota);

    if picker.remaining() > 0 {
        let mastered = shuffled(mastered, rng);
        picker.take(&mastered, picker.remaining());
        // Leftovers keep the order they were shuffled into above.
        picker.take(&new, picker.remaining());
        picker.take(&critical, picker.remaining());
    }

    picker.selected
}

fn quota(count: usize, share: f64) -> usize {
    (count as f64 * share).round() as usize
}

fn shuffled<'a, R: Rng + ?Sized>(mut words: Vec<&'a Word>, rng: &mut R) -> Vec<&'a Word> {
    words.shuffle(rng);
    words
}

/// Accumulates the selection, refusing duplicates and anything past `count`.
struct Picker {
    count: usize,
    selected: Vec<Word>,
    chosen: HashSet<WordId>,
}

impl Picker {
    fn new(count: usize) -> Self {
        Self {
            count,
            selected: Vec::with_capacity(count),
            chosen: HashSet::new(),
        }
    }

    fn remaining(&self) -> usize {
        self.count - self.selected.len()
    }

    fn take(&mut self, pool: &[&Word], limit: usize) {
        let limit = limit.min(self.remaining());
        let mut taken = 0;
        for word in pool {
            if taken == limit {
                break;
            }
            if self.chosen.insert(word.id) {
                self.selected.push((*word).clone());
                taken += 1;
            }
        }
    }
}
