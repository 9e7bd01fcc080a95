//! Observer port - abstraction for watching training runs and matches
//!
//! This port lets drivers report progress without coupling their loops to
//! progress bars or metrics collection.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Error, Result,
    tictactoe::{BoardState, GameOutcome, Player, Position},
};

/// Observer trait for monitoring drivers
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each ply in the game
///    - `on_game_end(game_num, outcome)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use tictactoe_agents::{ports::Observer, tictactoe::GameOutcome};
///
/// struct CountingObserver {
///     game_count: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         _outcome: GameOutcome,
///     ) -> tictactoe_agents::Result<()> {
///         self.game_count += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts (0-based index).
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each ply has been applied.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Ply number within the game (0-based)
    /// * `board` - Board before the move
    /// * `player` - Seat that moved
    /// * `position` - Cell that was taken
    /// * `reward` - Reward assigned to the ply (0 outside training)
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &BoardState,
        _player: Player,
        _position: Position,
        _reward: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal outcome.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shared observer handle
///
/// Lets a caller hand an observer to a driver and still read it afterwards.
impl<O: Observer> Observer for Arc<Mutex<O>> {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        lock(self)?.on_training_start(total_games)
    }

    fn on_game_start(&mut self, game_num: usize) -> Result<()> {
        lock(self)?.on_game_start(game_num)
    }

    fn on_move(
        &mut self,
        game_num: usize,
        step_num: usize,
        board: &BoardState,
        player: Player,
        position: Position,
        reward: f64,
    ) -> Result<()> {
        lock(self)?.on_move(game_num, step_num, board, player, position, reward)
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        lock(self)?.on_game_end(game_num, outcome)
    }

    fn on_training_end(&mut self) -> Result<()> {
        lock(self)?.on_training_end()
    }
}

fn lock<O>(shared: &Arc<Mutex<O>>) -> Result<MutexGuard<'_, O>> {
    shared.lock().map_err(|_| Error::ObserverLockPoisoned)
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[derive(Default)]
    struct GameCounter {
        games: usize,
    }

    impl Observer for GameCounter {
        fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
            self.games += 1;
            Ok(())
        }
    }

    #[test]
    fn shared_observer_forwards_events() {
        let counter = Arc::new(Mutex::new(GameCounter::default()));
        let mut handle = Arc::clone(&counter);
        handle.on_game_start(0).unwrap();
        handle.on_game_start(1).unwrap();
        assert_eq!(counter.lock().unwrap().games, 2);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let counter = Arc::new(Mutex::new(GameCounter::default()));
        let holder = Arc::clone(&counter);
        let _ = thread::spawn(move || {
            let _guard = holder.lock().unwrap();
            panic!("observer thread failed");
        })
        .join();

        let mut handle = Arc::clone(&counter);
        let err = handle.on_game_start(0).unwrap_err();
        assert!(matches!(err, Error::ObserverLockPoisoned));
    }
}
