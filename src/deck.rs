use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::catalog::{Catalog, CatalogItem, Category};
use crate::config::{AppConfig, FeverSource};
use crate::events::{DeckEvent, EventBus};
use crate::fever::{FeverEntry, FeverMachine};
use crate::quotes::{Quote, QuoteBook};
use crate::selector::weighted_draw;
use crate::store::{Persistence, Preferences};

/// One renderable card: the item plus its display metadata, resolved when
/// the selection is consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct CardEntry {
    pub item: CatalogItem,
    pub quote: Option<Quote>,
    pub tags: Vec<String>,
}

/// A draw resolved against the deck state at staging time. Committing after
/// a rebuild is a no-op, so a slow async caller cannot append a stale card.
#[derive(Debug)]
pub struct StagedDraw {
    generation: u64,
    item: CatalogItem,
}

/// Card stack controller: keeps a small lookahead buffer of ready cards,
/// applies swipe transitions, and feeds the fever gauge. All selection goes
/// through the weighted selector over the current pool (full catalog, or the
/// fever snapshot while fever is active).
pub struct Deck<S: Persistence> {
    catalog: Rc<Catalog>,
    quotes: Rc<QuoteBook>,
    prefs: Rc<RefCell<Preferences<S>>>,
    config: AppConfig,
    fever: FeverMachine,
    buffer: VecDeque<CardEntry>,
    bus: EventBus,
    rng: StdRng,
    generation: u64,
    exhausted: bool,
}

impl<S: Persistence> Deck<S> {
    pub fn new(
        catalog: Rc<Catalog>,
        quotes: Rc<QuoteBook>,
        prefs: Rc<RefCell<Preferences<S>>>,
        config: AppConfig,
    ) -> Self {
        Self::with_rng(catalog, quotes, prefs, config, StdRng::from_entropy())
    }

    pub fn with_rng(
        catalog: Rc<Catalog>,
        quotes: Rc<QuoteBook>,
        prefs: Rc<RefCell<Preferences<S>>>,
        config: AppConfig,
        rng: StdRng,
    ) -> Self {
        let fever = FeverMachine::new(config.fever_threshold, config.fever_duration_ms);
        Self {
            catalog,
            quotes,
            prefs,
            config,
            fever,
            buffer: VecDeque::new(),
            bus: EventBus::default(),
            rng,
            generation: 0,
            exhausted: false,
        }
    }

    pub fn subscribe<F: Fn(&DeckEvent) + 'static>(&mut self, handler: F) {
        self.bus.subscribe(handler);
    }

    pub fn peek_top(&self) -> Option<&CardEntry> {
        self.buffer.front()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fever_active(&self) -> bool {
        self.fever.is_active()
    }

    pub fn fever_gauge(&self) -> u32 {
        self.fever.gauge()
    }

    pub fn fever_threshold(&self) -> u32 {
        self.fever.threshold()
    }

    pub fn fever_fraction(&self) -> f64 {
        self.fever.fraction_remaining()
    }

    /// Swipe-right: records the item (first accept of a key wins), feeds the
    /// fever gauge while idle, advances the stack.
    pub fn accept(&mut self) {
        let Some(entry) = self.buffer.pop_front() else {
            return;
        };
        let key = entry.item.key();
        self.prefs.borrow_mut().record_accept(&key);

        if self.fever.record_accept() {
            let snapshot = self.fever_snapshot();
            match self.fever.enter(snapshot) {
                FeverEntry::Entered => {
                    self.bus.emit(DeckEvent::FeverEntered);
                    // Make the narrowed pool visible immediately.
                    self.buffer.clear();
                }
                FeverEntry::EmptyPool => {
                    self.bus.emit(DeckEvent::FeverEntered);
                    self.bus.emit(DeckEvent::FeverExited);
                }
                FeverEntry::AlreadyActive => {}
            }
        }

        self.replenish();
        self.bus.emit(DeckEvent::CardChanged);
    }

    /// Swipe-left: discards the top card with no history or gauge effect.
    pub fn reject(&mut self) {
        if self.buffer.pop_front().is_none() {
            return;
        }
        self.replenish();
        self.bus.emit(DeckEvent::CardChanged);
    }

    pub fn toggle_favorite(&mut self, key: &str) {
        let favorite = self.prefs.borrow_mut().toggle_favorite(key);
        self.bus.emit(DeckEvent::FavoriteToggled {
            key: key.to_string(),
            favorite,
        });
    }

    /// Discards the whole buffer and repopulates. Any draw staged before
    /// this call is invalidated.
    pub fn rebuild(&mut self) {
        self.generation += 1;
        self.buffer.clear();
        self.exhausted = false;
        self.replenish();
        if !self.buffer.is_empty() {
            self.bus.emit(DeckEvent::CardChanged);
        }
    }

    pub fn set_weight(&mut self, person: &str, weight: u32) {
        self.prefs.borrow_mut().set_weight(person, weight);
        self.rebuild();
    }

    pub fn clear_history(&mut self) {
        self.prefs.borrow_mut().clear_history();
    }

    /// Fever countdown step, driven by the UI's interval.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.fever.tick(elapsed_ms) {
            self.bus.emit(DeckEvent::FeverExited);
        }
    }

    /// Draws against the current pool without appending yet; the caller may
    /// await (image predecode, asset load) before committing.
    pub fn stage_draw(&mut self) -> Option<StagedDraw> {
        self.draw().map(|item| StagedDraw {
            generation: self.generation,
            item,
        })
    }

    /// Appends a staged draw; returns false and drops it when the deck was
    /// rebuilt since staging.
    pub fn commit_draw(&mut self, staged: StagedDraw) -> bool {
        if staged.generation != self.generation {
            return false;
        }
        let entry = self.make_entry(staged.item);
        self.buffer.push_back(entry);
        true
    }

    fn replenish(&mut self) {
        while self.buffer.len() < self.config.lookahead_depth {
            let Some(staged) = self.stage_draw() else {
                break;
            };
            self.commit_draw(staged);
        }
        if self.buffer.is_empty() && !self.exhausted {
            self.exhausted = true;
            self.bus.emit(DeckEvent::NoContentAvailable);
        }
    }

    /// Candidate tiers keep the stack fresh without ever promising unique
    /// sequencing: unseen items first, then anything not already buffered,
    /// then the whole pool.
    fn draw(&mut self) -> Option<CatalogItem> {
        let pool: Vec<CatalogItem> = if self.fever.is_active() {
            self.fever.pool().to_vec()
        } else {
            self.catalog.items(Category::Primary).to_vec()
        };
        if pool.is_empty() {
            return None;
        }

        let buffered: HashSet<String> =
            self.buffer.iter().map(|entry| entry.item.key()).collect();
        let prefs = self.prefs.borrow();

        let unseen: Vec<CatalogItem> = if self.fever.is_active() {
            Vec::new()
        } else {
            pool.iter()
                .filter(|item| {
                    let key = item.key();
                    !buffered.contains(&key) && !prefs.history().iter().any(|seen| *seen == key)
                })
                .cloned()
                .collect()
        };
        let unbuffered: Vec<CatalogItem> = pool
            .iter()
            .filter(|item| !buffered.contains(&item.key()))
            .cloned()
            .collect();

        for tier in [&unseen, &unbuffered, &pool] {
            if tier.is_empty() {
                continue;
            }
            if let Some(item) = weighted_draw(
                tier,
                prefs.weights(),
                self.config.default_weight,
                &mut self.rng,
            ) {
                return Some(item.clone());
            }
        }
        None
    }

    fn make_entry(&mut self, item: CatalogItem) -> CardEntry {
        let key = item.key();
        let quotes = self.quotes.quotes_for(&item.person);
        let quote = if quotes.is_empty() {
            None
        } else {
            Some(quotes[self.rng.gen_range(0..quotes.len())].clone())
        };
        CardEntry {
            tags: self.quotes.tags_for(&key).to_vec(),
            quote,
            item,
        }
    }

    fn fever_snapshot(&self) -> Vec<CatalogItem> {
        let prefs = self.prefs.borrow();
        let keys: Vec<String> = match self.config.fever_source {
            FeverSource::Favorites => prefs.favorites().iter().cloned().collect(),
            FeverSource::Accepted => prefs.history().to_vec(),
        };
        keys.iter()
            .filter_map(|key| self.catalog.find(key).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_person;
    use crate::store::MemoryStore;

    fn build_deck(
        people: &[(&str, u32)],
        config: AppConfig,
        seed: u64,
    ) -> (Deck<MemoryStore>, Rc<RefCell<Vec<DeckEvent>>>) {
        let catalog = Rc::new(Catalog::new(
            people
                .iter()
                .map(|(name, count)| test_person(name, *count, 0))
                .collect(),
        ));
        let prefs = Rc::new(RefCell::new(Preferences::load(MemoryStore::default())));
        let mut deck = Deck::with_rng(
            catalog,
            Rc::new(QuoteBook::default()),
            prefs,
            config,
            StdRng::seed_from_u64(seed),
        );
        let log: Rc<RefCell<Vec<DeckEvent>>> = Rc::default();
        let sink = log.clone();
        deck.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (deck, log)
    }

    fn count(log: &Rc<RefCell<Vec<DeckEvent>>>, wanted: &DeckEvent) -> usize {
        log.borrow().iter().filter(|event| *event == wanted).count()
    }

    #[test]
    fn six_accepts_over_six_items_yield_six_unique_keys() {
        let config = AppConfig {
            fever_threshold: 100,
            ..AppConfig::default()
        };
        let (mut deck, _log) = build_deck(&[("a", 2), ("b", 2), ("c", 2)], config, 11);
        deck.rebuild();
        for _ in 0..6 {
            assert!(deck.peek_top().is_some(), "top went empty mid-sequence");
            deck.accept();
        }
        let prefs = deck.prefs.borrow();
        let unique: HashSet<&String> = prefs.history().iter().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn repeated_accepts_of_one_item_record_once() {
        let (mut deck, _log) = build_deck(
            &[("solo", 1)],
            AppConfig {
                fever_threshold: 100,
                ..AppConfig::default()
            },
            5,
        );
        deck.rebuild();
        deck.accept();
        deck.accept();
        assert_eq!(deck.prefs.borrow().history().len(), 1);
        // The pool is exhausted of unseen items but the stack keeps serving.
        assert!(deck.peek_top().is_some());
    }

    #[test]
    fn gauge_crossing_with_favorites_enters_fever_once() {
        let config = AppConfig {
            fever_threshold: 3,
            ..AppConfig::default()
        };
        let (mut deck, log) = build_deck(&[("a", 2), ("b", 2)], config, 21);
        deck.rebuild();
        let first_key = deck.peek_top().unwrap().item.key();
        deck.toggle_favorite(&first_key);

        for _ in 0..3 {
            deck.accept();
        }
        assert_eq!(count(&log, &DeckEvent::FeverEntered), 1);
        assert!(deck.fever_active());
        assert_eq!(deck.fever_gauge(), 0);
        // The narrowed pool only serves the favorited item.
        for _ in 0..4 {
            assert_eq!(deck.peek_top().unwrap().item.key(), first_key);
            deck.accept();
        }
    }

    #[test]
    fn accepts_during_fever_never_move_the_gauge_or_reenter() {
        let config = AppConfig {
            fever_threshold: 2,
            ..AppConfig::default()
        };
        let (mut deck, log) = build_deck(&[("a", 3)], config, 33);
        deck.rebuild();
        let key = deck.peek_top().unwrap().item.key();
        deck.toggle_favorite(&key);
        deck.accept();
        deck.accept();
        assert!(deck.fever_active());

        for _ in 0..5 {
            deck.accept();
        }
        assert_eq!(deck.fever_gauge(), 0);
        assert_eq!(count(&log, &DeckEvent::FeverEntered), 1);
        assert!(deck.fever_active());
    }

    #[test]
    fn empty_favorite_pool_enters_and_exits_in_the_same_step() {
        let config = AppConfig {
            fever_threshold: 2,
            ..AppConfig::default()
        };
        let (mut deck, log) = build_deck(&[("a", 3)], config, 44);
        deck.rebuild();
        deck.accept();
        deck.accept();

        assert!(!deck.fever_active());
        assert_eq!(deck.fever_gauge(), 0);
        let events = log.borrow();
        let enter = events
            .iter()
            .position(|event| *event == DeckEvent::FeverEntered)
            .expect("no enter event");
        assert_eq!(events[enter + 1], DeckEvent::FeverExited);
        // Normal selection resumed.
        drop(events);
        assert!(deck.peek_top().is_some());
    }

    #[test]
    fn countdown_expiry_exits_and_resumes_the_full_pool() {
        let config = AppConfig {
            fever_threshold: 1,
            fever_duration_ms: 500,
            ..AppConfig::default()
        };
        let (mut deck, log) = build_deck(&[("a", 1), ("b", 1)], config, 8);
        deck.rebuild();
        let key = deck.peek_top().unwrap().item.key();
        deck.toggle_favorite(&key);
        deck.accept();
        assert!(deck.fever_active());

        for _ in 0..4 {
            deck.tick(100);
            assert!(deck.fever_active());
        }
        deck.tick(100);
        assert!(!deck.fever_active());
        assert_eq!(count(&log, &DeckEvent::FeverExited), 1);
        assert_eq!(deck.fever_gauge(), 0);

        // Post-fever draws come from the whole catalog again.
        deck.rebuild();
        let mut seen = HashSet::new();
        for _ in 0..40 {
            seen.insert(deck.peek_top().unwrap().item.person.clone());
            deck.reject();
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn reject_has_no_history_or_gauge_side_effect() {
        let (mut deck, _log) = build_deck(&[("a", 4)], AppConfig::default(), 13);
        deck.rebuild();
        deck.reject();
        deck.reject();
        assert!(deck.prefs.borrow().history().is_empty());
        assert_eq!(deck.fever_gauge(), 0);
        assert!(deck.peek_top().is_some());
    }

    #[test]
    fn empty_catalog_reports_no_content_once_and_idles() {
        let (mut deck, log) = build_deck(&[], AppConfig::default(), 1);
        deck.rebuild();
        assert!(deck.peek_top().is_none());
        deck.accept();
        deck.reject();
        assert_eq!(count(&log, &DeckEvent::NoContentAvailable), 1);
    }

    #[test]
    fn stale_staged_draw_is_dropped_after_rebuild() {
        let (mut deck, _log) = build_deck(&[("a", 4)], AppConfig::default(), 17);
        deck.rebuild();
        let staged = deck.stage_draw().unwrap();
        deck.rebuild();
        let depth_after_rebuild = deck.buffer.len();
        assert!(!deck.commit_draw(staged));
        assert_eq!(deck.buffer.len(), depth_after_rebuild);
    }

    #[test]
    fn favorite_toggle_emits_membership_state() {
        let (mut deck, log) = build_deck(&[("a", 1)], AppConfig::default(), 2);
        deck.toggle_favorite("a/primary/1");
        deck.toggle_favorite("a/primary/1");
        assert_eq!(
            *log.borrow(),
            vec![
                DeckEvent::FavoriteToggled {
                    key: "a/primary/1".to_string(),
                    favorite: true,
                },
                DeckEvent::FavoriteToggled {
                    key: "a/primary/1".to_string(),
                    favorite: false,
                },
            ]
        );
    }

    #[test]
    fn weight_change_rebuilds_and_biases_selection() {
        let (mut deck, _log) = build_deck(&[("hot", 2), ("cold", 2)], AppConfig::default(), 29);
        deck.set_weight("hot", 50);
        deck.set_weight("cold", 0);
        let mut hot = 0u32;
        for _ in 0..30 {
            if deck.peek_top().unwrap().item.person == "hot" {
                hot += 1;
            }
            deck.reject();
        }
        assert!(hot >= 25, "observed {hot}");
    }

    #[test]
    fn cards_carry_quotes_and_tags_when_present() {
        let catalog = Rc::new(Catalog::new(vec![test_person("ami", 1, 0)]));
        let quotes = crate::quotes::parse_quotes("ami\tHello there\tsoft\n");
        let tags = crate::quotes::parse_tags("ami/primary/1\tcute|stage\n");
        let prefs = Rc::new(RefCell::new(Preferences::load(MemoryStore::default())));
        let mut deck = Deck::with_rng(
            catalog,
            Rc::new(QuoteBook::new(quotes, tags)),
            prefs,
            AppConfig::default(),
            StdRng::seed_from_u64(3),
        );
        deck.rebuild();
        let top = deck.peek_top().unwrap();
        assert_eq!(top.quote.as_ref().unwrap().text, "Hello there");
        assert_eq!(top.tags, ["cute", "stage"]);
    }
}
