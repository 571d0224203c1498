use std::sync::Arc;

use tracing::debug;

use crate::error::GamesError;
use crate::types::Game;

/// Shared, read-only view of the collection at the moment it was taken.
pub type Snapshot = Arc<Vec<Game>>;

/// Ordered collection of discovered games.
///
/// Insertion order is preserved and duplicates are allowed. Snapshots handed
/// out by [`state`](Self::state) are never mutated afterwards: `push` copies
/// the backing vector if a snapshot still shares it, and `reset` swaps in a
/// fresh allocation.
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    games: Snapshot,
    generation: u64,
}

impl GameStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current collection.
    pub fn state(&self) -> Snapshot {
        Arc::clone(&self.games)
    }

    /// Append a game to the end of the collection.
    ///
    /// Fails without touching the collection if `name` or `parent` is empty.
    pub fn push(&mut self, game: Game) -> Result<(), GamesError> {
        game.validate()?;
        debug!(name = %game.name, parent = %game.parent, "game added");
        Arc::make_mut(&mut self.games).push(game);
        self.generation += 1;
        Ok(())
    }

    /// Push every game in order, stopping at the first invalid record.
    ///
    /// Games pushed before the failure stay in the collection.
    pub fn push_all<I>(&mut self, games: I) -> Result<usize, GamesError>
    where
        I: IntoIterator<Item = Game>,
    {
        let mut pushed = 0;
        for game in games {
            self.push(game)?;
            pushed += 1;
        }
        Ok(pushed)
    }

    /// Replace the collection with a new, empty one.
    pub fn reset(&mut self) {
        self.games = Arc::new(Vec::new());
        self.generation += 1;
        debug!(generation = self.generation, "games store reset");
    }

    /// Swap in a new collection holding `games`, in order.
    ///
    /// Every record is validated first; on failure the current collection is
    /// left as it was.
    pub fn replace_all(&mut self, games: Vec<Game>) -> Result<usize, GamesError> {
        for game in &games {
            game.validate()?;
        }
        let count = games.len();
        self.games = Arc::new(games);
        self.generation += 1;
        debug!(count, generation = self.generation, "games store replaced");
        Ok(count)
    }

    /// Number of games currently stored.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the store holds no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Iterate over the stored games in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    /// Counter bumped by every successful mutation.
    ///
    /// Observers compare it against the value they last saw to learn that the
    /// collection changed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Serialize the current collection as a JSON array.
    pub fn to_json(&self) -> Result<String, GamesError> {
        Ok(serde_json::to_string_pretty(self.games.as_slice())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(name: &str, parent: &str, directory: &str, glob: &str, image: &str) -> Game {
        Game {
            name: name.into(),
            parent: parent.into(),
            directory: directory.into(),
            globs: vec![glob.into()],
            image: image.into(),
        }
    }

    fn chess() -> Game {
        game("Chess", "Boardgames", "/games/chess", "*.pgn", "chess.png")
    }

    fn go() -> Game {
        game("Go", "Boardgames", "/games/go", "*.sgf", "go.png")
    }

    #[test]
    fn new_store_is_empty() {
        let store = GameStore::new();

        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.state().is_empty());
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn push_preserves_call_order() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        store.push(go()).unwrap();

        let state = store.state();
        assert_eq!(state.len(), 2);
        assert_eq!(state[0], chess());
        assert_eq!(state[1], go());
    }

    #[test]
    fn push_then_reset_scenario() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        store.push(go()).unwrap();

        let names: Vec<&str> = store.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Chess", "Go"]);

        store.reset();
        assert!(store.state().is_empty());
    }

    #[test]
    fn length_tracks_number_of_pushes() {
        let mut store = GameStore::new();
        for i in 0..25 {
            let name = format!("Game {i}");
            store
                .push(game(&name, "Document", "saves", "*.sav", ""))
                .unwrap();
            assert_eq!(store.len(), i + 1);
        }

        let names: Vec<String> = store.iter().map(|g| g.name.clone()).collect();
        let expected: Vec<String> = (0..25).map(|i| format!("Game {i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        store.push(chess()).unwrap();

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn invalid_push_leaves_collection_unchanged() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        let generation = store.generation();

        let err = store
            .push(game("", "Boardgames", "/games/x", "*", ""))
            .unwrap_err();

        assert!(matches!(err, GamesError::Validation { field: "name" }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.generation(), generation);
    }

    #[test]
    fn snapshot_survives_reset() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        store.push(go()).unwrap();

        let before = store.state();
        store.reset();

        assert_eq!(before.len(), 2);
        assert_eq!(before[0].name, "Chess");
        assert!(store.state().is_empty());
    }

    #[test]
    fn snapshot_is_not_mutated_by_push() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();

        let before = store.state();
        store.push(go()).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn reset_twice_stays_empty() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();

        store.reset();
        assert!(store.state().is_empty());
        store.reset();
        assert!(store.state().is_empty());
        assert!(store.state().is_empty());
    }

    #[test]
    fn reset_installs_fresh_collection() {
        let mut store = GameStore::new();
        let first = store.state();
        store.reset();

        assert!(!Arc::ptr_eq(&first, &store.state()));
    }

    #[test]
    fn generation_counts_mutations() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        store.push(go()).unwrap();
        store.reset();

        assert_eq!(store.generation(), 3);
    }

    #[test]
    fn push_all_stops_at_first_invalid() {
        let mut store = GameStore::new();
        let games = vec![chess(), game("Bad", "", "", "*", ""), go()];

        let err = store.push_all(games).unwrap_err();

        assert!(matches!(err, GamesError::Validation { field: "parent" }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.state()[0], chess());
    }

    #[test]
    fn push_all_returns_count() {
        let mut store = GameStore::new();
        assert_eq!(store.push_all(vec![chess(), go()]).unwrap(), 2);
    }

    #[test]
    fn replace_all_swaps_in_new_collection() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        let before = store.state();

        assert_eq!(store.replace_all(vec![go(), go()]).unwrap(), 2);

        assert_eq!(store.state().as_slice(), &[go(), go()]);
        assert_eq!(before.as_slice(), &[chess()]);
        assert_eq!(store.generation(), 2);
    }

    #[test]
    fn replace_all_with_invalid_record_keeps_collection() {
        let mut store = GameStore::new();
        store.push(game("Stale", "Document", "Old", "*", "")).unwrap();
        let generation = store.generation();

        let err = store
            .replace_all(vec![chess(), game("  ", "Document", "x", "*", "")])
            .unwrap_err();

        assert!(matches!(err, GamesError::Validation { field: "name" }));
        let names: Vec<&str> = store.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Stale"]);
        assert_eq!(store.generation(), generation);
    }

    #[test]
    fn to_json_exports_in_order() {
        let mut store = GameStore::new();
        store.push(chess()).unwrap();
        store.push(go()).unwrap();

        let json = store.to_json().unwrap();
        let parsed: Vec<Game> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![chess(), go()]);
    }
}
