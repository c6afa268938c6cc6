//! Random self-play demo: drives a full game through the engine's public
//! surface and prints the outbound notification stream as JSON lines, the way
//! a network layer would forward it.

use rand::{thread_rng, Rng};

use coup_engine::{ActionKind, Character, Coup, GameConfig, GameState, Response};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut rng = thread_rng();
    let num_players = rng.gen_range(3..=6);

    let mut game = Coup::new(GameConfig::default(), thread_rng());
    for i in 0..num_players {
        game.add_player(format!("Player {}", i + 1)).unwrap();
    }
    game.start_game().unwrap();
    drain_events(&mut game);

    while game.state() != GameState::GameOver {
        match game.state() {
            GameState::Playing => submit_random_action(&mut game, &mut rng),
            GameState::WaitingForResponse => submit_random_response(&mut game, &mut rng),
            state => unreachable!("demo loop saw {state:?}"),
        }
        drain_events(&mut game);
    }

    println!(
        "winner: player {} after {} turns",
        game.winner().unwrap(),
        game.turn()
    );
}

fn submit_random_action<R: Rng>(game: &mut Coup<impl Rng>, rng: &mut R) {
    let actor = game.current_player();
    let coins = game.players()[actor].coins();

    let targets: Vec<usize> = game
        .players()
        .iter()
        .filter(|p| p.is_alive() && p.id() != actor)
        .map(|p| p.id())
        .collect();
    let target = Some(targets[rng.gen_range(0..targets.len())]);

    let result = if coins >= 7 {
        // coup whenever affordable, mandatory at ten coins
        game.perform_action(actor, ActionKind::Coup, target)
    } else {
        match rng.gen_range(0..6) {
            0 => game.perform_action(actor, ActionKind::Income, None),
            1 => game.perform_action(actor, ActionKind::ForeignAid, None),
            2 => game.perform_action(actor, ActionKind::Tax, None),
            3 => game.perform_action(actor, ActionKind::Steal, target),
            4 if coins >= 3 => game.perform_action(actor, ActionKind::Assassinate, target),
            _ => game.perform_action(actor, ActionKind::Exchange, None),
        }
    };
    result.expect("demo only submits legal actions");
}

fn submit_random_response<R: Rng>(game: &mut Coup<impl Rng>, rng: &mut R) {
    let responder = game.pending_responders()[0];
    let kind = game.pending_action().unwrap().kind;

    match rng.gen_range(0..4) {
        0 => game.respond_to_action(responder, Response::Challenge),
        1 => {
            if let Some(claim) = block_claim(kind) {
                game.respond_to_action(responder, Response::Block { claim });
            } else {
                game.respond_to_action(responder, Response::Allow);
            }
        }
        2 => {
            // let the window lapse instead of answering
            let deadline = game.response_deadline().unwrap();
            game.tick(deadline);
        }
        _ => game.respond_to_action(responder, Response::Allow),
    }
}

fn block_claim(kind: ActionKind) -> Option<Character> {
    match kind {
        ActionKind::ForeignAid => Some(Character::Duke),
        ActionKind::Steal => Some(Character::Captain),
        ActionKind::Assassinate => Some(Character::Contessa),
        _ => None,
    }
}

fn drain_events(game: &mut Coup<impl Rng>) {
    for event in game.take_events() {
        println!(
            "{}",
            serde_json::to_string(&event).expect("events serialize")
        );
    }
}
