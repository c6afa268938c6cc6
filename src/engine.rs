//! The turn/response state machine. One `Coup` value is the single authority
//! for a game: it owns the deck and the roster, and every mutation goes
//! through `&mut self`, so exclusive access is the borrow checker's problem.
//! Hosts feeding it from several connections wrap it in a `Mutex` and call in;
//! nothing here blocks.

use std::fmt::{Debug, Formatter};
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::{ActionKind, GameAction, Response};
use crate::card::Character;
use crate::deck::Deck;
use crate::error::CoupError;
use crate::events::GameEvent;
use crate::player::Player;
use crate::rules;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    WaitingForPlayers,
    Starting,
    Playing,
    WaitingForResponse,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub max_players: usize,
    pub response_time_limit: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: rules::MAX_PLAYERS,
            response_time_limit: Duration::from_secs(15),
        }
    }
}

/// An action waiting out its contest window. Present only while the engine is
/// in `WaitingForResponse`; cleared unconditionally once resolution begins.
#[derive(Clone, Debug)]
struct PendingResponse {
    action: GameAction,
    responders: Vec<usize>,
    deadline: Instant,
}

pub struct Coup<R: Rng> {
    config: GameConfig,
    state: GameState,
    players: Vec<Player>,
    deck: Deck,
    current_player_idx: usize,
    turn: usize,
    pending: Option<PendingResponse>,
    events: Vec<GameEvent>,
    rng: R,
}

impl<R: Rng> Debug for Coup<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(
            format!(
                "T {} | {:?} | P {}\n",
                self.turn, self.state, self.current_player_idx
            )
            .as_str(),
        )?;
        for player in &self.players {
            f.write_str(
                format!(
                    "\tP {}: ${} | {:?} | lost {:?}\n",
                    player.id, player.coins, player.hand, player.revealed
                )
                .as_str(),
            )?;
        }
        Ok(())
    }
}

impl<R: Rng> Coup<R> {
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self {
            config,
            state: GameState::WaitingForPlayers,
            players: Vec::new(),
            deck: Deck::standard(),
            current_player_idx: 0,
            turn: 0,
            pending: None,
            events: Vec::new(),
            rng,
        }
    }

    // ------------------------------------------------------------------
    // lobby
    // ------------------------------------------------------------------

    pub fn add_player(&mut self, name: impl Into<String>) -> Result<usize, CoupError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(CoupError::LobbyClosed);
        }
        if self.players.len() >= self.config.max_players {
            return Err(CoupError::LobbyFull);
        }

        let id = self.players.len();
        let name = name.into();
        self.players.push(Player::new(id, name.clone()));
        self.events.push(GameEvent::PlayerJoined { player: id, name });

        Ok(id)
    }

    /// Drop a player (disconnect). The slot stays in the roster so turn order
    /// keeps working; the player just stops being alive. If they were the
    /// last outstanding responder, the pending action resolves as allowed.
    pub fn remove_player(&mut self, player: usize) -> Result<(), CoupError> {
        if player >= self.players.len() {
            return Err(CoupError::UnknownPlayer);
        }

        self.players[player].alive = false;
        self.events.push(GameEvent::PlayerLeft { player });
        info!(player, "player left");

        // a responder who leaves counts as an implicit allow
        let mut unblocked = None;
        if let Some(pending) = self.pending.as_mut() {
            pending.responders.retain(|&idx| idx != player);
            if pending.responders.is_empty() {
                unblocked = Some(pending.action);
            }
        }
        if let Some(action) = unblocked {
            self.pending = None;
            self.resolve_action(action);
            return Ok(());
        }

        if self.state == GameState::Playing || self.state == GameState::WaitingForResponse {
            if rules::is_game_over(&self.players) {
                self.end_game();
            } else if self.state == GameState::Playing && player == self.current_player_idx {
                // don't leave the table waiting on a turn that will never come
                self.next_turn();
            }
        }

        Ok(())
    }

    pub fn start_game(&mut self) -> Result<(), CoupError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(CoupError::OutOfState);
        }

        let living: Vec<usize> = self
            .players
            .iter()
            .filter(|p| p.is_alive())
            .map(|p| p.id())
            .collect();
        if !rules::is_valid_player_count(living.len()) {
            return Err(CoupError::InvalidPlayerCount);
        }

        self.set_state(GameState::Starting);

        self.deck = Deck::standard();
        self.deck.shuffle(&mut self.rng);

        // roster order, one hand at a time, off the front of the deck
        for &idx in &living {
            for _ in 0..rules::STARTING_INFLUENCES {
                let card = self
                    .deck
                    .draw()
                    .expect("standard deck covers every starting hand");
                self.players[idx].add_card(card);
            }
        }

        self.current_player_idx = living[self.rng.gen_range(0..living.len())];
        self.turn = 0;
        self.set_state(GameState::Playing);
        self.assert_card_conservation();

        info!(
            players = living.len(),
            first = self.current_player_idx,
            "game started"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // turns
    // ------------------------------------------------------------------

    /// Submit the current player's action. A contestable action with at least
    /// one eligible responder opens the response window instead of resolving.
    pub fn perform_action(
        &mut self,
        player: usize,
        kind: ActionKind,
        target: Option<usize>,
    ) -> Result<(), CoupError> {
        if self.state != GameState::Playing {
            return Err(CoupError::OutOfState);
        }
        if player >= self.players.len() {
            return Err(CoupError::UnknownPlayer);
        }
        if player != self.current_player_idx {
            return Err(CoupError::OutOfTurn);
        }
        if !self.players[player].is_alive() {
            return Err(CoupError::IllegalAction);
        }
        if rules::is_forced_coup(&self.players[player]) && kind != ActionKind::Coup {
            return Err(CoupError::ForcedCoup);
        }
        if rules::requires_target(kind) && !rules::is_valid_target(player, target, &self.players)
        {
            return Err(CoupError::InvalidTarget);
        }

        let action = GameAction::new(player, kind, target);
        if !rules::can_perform(&self.players[player], &action, &self.players) {
            return Err(CoupError::IllegalAction);
        }

        debug!(?action, "action submitted");

        // challengers first, then blockers, deduplicated
        let mut responders = rules::potential_challengers(&action, &self.players);
        for idx in rules::potential_blockers(&action, &self.players) {
            if !responders.contains(&idx) {
                responders.push(idx);
            }
        }

        if responders.is_empty() {
            self.resolve_action(action);
        } else {
            self.pending = Some(PendingResponse {
                action,
                responders,
                deadline: Instant::now() + self.config.response_time_limit,
            });
            self.set_state(GameState::WaitingForResponse);
        }

        Ok(())
    }

    /// Submit one responder's reply. Calls outside the response window, or
    /// from players not (or no longer) entitled to respond, are ignored:
    /// clients race the timeout and each other, and losing that race is not
    /// an error.
    pub fn respond_to_action(&mut self, player: usize, response: Response) {
        if self.state != GameState::WaitingForResponse {
            return;
        }
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(pos) = pending.responders.iter().position(|&idx| idx == player) else {
            return;
        };

        // a claim that could never block this action is a protocol error, not
        // a bluff; drop it without consuming the player's response
        if let Response::Block { claim } = response {
            if !claim.blocks(pending.action.kind) {
                debug!(player, ?claim, "ignoring block claim that cannot block");
                return;
            }
        }

        pending.responders.remove(pos);
        let action = pending.action;
        let all_responded = pending.responders.is_empty();

        debug!(player, ?response, "response received");

        match response {
            Response::Allow => {
                if all_responded {
                    self.pending = None;
                    self.resolve_action(action);
                }
            }
            Response::Challenge => {
                self.pending = None;
                self.resolve_challenge(action, player);
            }
            Response::Block { claim } => {
                self.pending = None;
                self.resolve_block(action, player, claim);
            }
        }
    }

    /// Scheduler hook. Expires the response window once `now` passes the
    /// deadline, as if the remaining responders had all allowed. Safe to race
    /// against `respond_to_action`: whichever resolves first clears the
    /// window and the loser of the race no-ops.
    pub fn tick(&mut self, now: Instant) {
        if self.state != GameState::WaitingForResponse {
            return;
        }
        let Some(pending) = self.pending.as_ref() else {
            return;
        };
        if now < pending.deadline {
            return;
        }

        let action = pending.action;
        debug!(?action, "response window expired, resolving unchallenged");
        self.pending = None;
        self.resolve_action(action);
    }

    // ------------------------------------------------------------------
    // resolution
    // ------------------------------------------------------------------

    fn resolve_challenge(&mut self, action: GameAction, challenger: usize) {
        let required = action.claim.expect("challenged action must claim a card");

        if self.players[action.player].has_character(required) {
            // challenge fails: challenger pays, the actor proves the card,
            // swaps it for a fresh draw, and the action goes through
            info!(challenger, actor = action.player, card = ?required, "challenge failed");
            self.lose_influence(challenger, None);
            self.return_and_redraw(action.player, required);
            self.resolve_action(action);
        } else {
            // challenge succeeds: the bluff costs the actor an influence and
            // the action dies with no effect
            info!(challenger, actor = action.player, card = ?required, "challenge succeeded");
            self.lose_influence(action.player, None);
            if rules::is_game_over(&self.players) {
                self.end_game();
            } else {
                self.next_turn();
            }
        }
    }

    fn resolve_block(&mut self, action: GameAction, blocker: usize, claim: Character) {
        // the claim is taken at face value: no hand check, and the block
        // itself cannot be challenged
        info!(blocker, ?claim, ?action, "action blocked");
        self.next_turn();
    }

    fn resolve_action(&mut self, action: GameAction) {
        match action.kind {
            ActionKind::Income | ActionKind::ForeignAid | ActionKind::Tax => {
                self.players[action.player].gain_coins(rules::action_gain(action.kind));
            }
            ActionKind::Coup | ActionKind::Assassinate => {
                let target = action.target.expect("targeted action without a target");
                self.players[action.player].spend_coins(rules::action_cost(action.kind));
                self.lose_influence(target, None);
            }
            ActionKind::Steal => {
                let target = action.target.expect("targeted action without a target");
                let amount =
                    rules::action_gain(ActionKind::Steal).min(self.players[target].coins());
                self.players[target].spend_coins(amount);
                self.players[action.player].gain_coins(amount);
            }
            ActionKind::Exchange => {
                self.perform_exchange(action.player);
            }
        }

        debug!(?action, "action resolved");
        self.events.push(GameEvent::ActionPerformed(action));
        self.assert_card_conservation();

        if rules::is_game_over(&self.players) {
            self.end_game();
        } else {
            self.next_turn();
        }
    }

    /// Flip one of a player's cards face-up. `card` of `None` takes the first
    /// card in hand order; a client-driven choice can pass a real index.
    fn lose_influence(&mut self, player: usize, card: Option<usize>) {
        let target = &mut self.players[player];
        if target.influence_count() == 0 {
            return;
        }

        let lost = target.lose_card(card.unwrap_or(0));
        debug!(player, card = ?lost, "influence lost");

        if !target.is_alive() {
            info!(player, "player is out of the game");
        }
    }

    /// Challenge-win swap: the proven card goes back into the deck, the deck
    /// is reshuffled, and the actor draws a replacement.
    fn return_and_redraw(&mut self, player: usize, character: Character) {
        let card = self.players[player]
            .take_card(character)
            .expect("proven card must be in hand");
        self.deck.return_card(card);
        self.deck.shuffle(&mut self.rng);

        if let Some(replacement) = self.deck.draw() {
            self.players[player].add_card(replacement);
        }
        self.assert_card_conservation();
    }

    fn perform_exchange(&mut self, player: usize) {
        for card in self.players[player].hand.drain(..) {
            self.deck.return_card(card);
        }
        self.deck.shuffle(&mut self.rng);

        for _ in 0..rules::STARTING_INFLUENCES {
            match self.deck.draw() {
                Some(card) => self.players[player].add_card(card),
                None => break,
            }
        }
    }

    fn next_turn(&mut self) {
        self.pending = None;
        self.turn += 1;
        self.current_player_idx = self.next_living_player();
        self.set_state(GameState::Playing);
        debug!(player = self.current_player_idx, turn = self.turn, "next turn");
    }

    fn next_living_player(&self) -> usize {
        let mut idx = (self.current_player_idx + 1) % self.players.len();
        while !self.players[idx].is_alive() {
            idx = (idx + 1) % self.players.len();
        }
        idx
    }

    fn end_game(&mut self) {
        self.pending = None;
        let winner = rules::winner(&self.players).expect("game over with no living player");
        self.set_state(GameState::GameOver);
        self.events.push(GameEvent::GameEnded { winner });
        info!(winner, "game over");
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
        self.events.push(GameEvent::StateChanged(state));
    }

    fn assert_card_conservation(&self) {
        debug_assert_eq!(
            self.deck.len() + self.players.iter().map(Player::card_count).sum::<usize>(),
            rules::DECK_SIZE,
            "card conservation violated"
        );
    }

    // ------------------------------------------------------------------
    // observation
    // ------------------------------------------------------------------

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_player(&self) -> usize {
        self.current_player_idx
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: usize) -> Option<&Player> {
        self.players.get(id)
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_alive()).count()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn winner(&self) -> Option<usize> {
        if self.state == GameState::GameOver {
            rules::winner(&self.players)
        } else {
            None
        }
    }

    /// The action currently awaiting responses, if any.
    pub fn pending_action(&self) -> Option<GameAction> {
        self.pending.as_ref().map(|p| p.action)
    }

    /// Players still entitled to respond to the pending action.
    pub fn pending_responders(&self) -> &[usize] {
        self.pending
            .as_ref()
            .map(|p| p.responders.as_slice())
            .unwrap_or(&[])
    }

    /// When the open response window expires. Hosts may schedule an alarm for
    /// this instant instead of polling `tick`; a resolved window simply makes
    /// the alarm a no-op.
    pub fn response_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Drain queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
