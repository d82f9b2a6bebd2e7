use cozy_chess::Square;
use duelboard::{GameController, GameStatus, RulesEngine};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn legal_pairs(c: &GameController) -> Vec<(Square, Square)> {
    let mut pairs: Vec<(Square, Square)> = Square::ALL
        .iter()
        .flat_map(|&sq| c.engine().legal_moves(sq))
        .map(|m| (m.from, m.to))
        .collect();
    // promotions appear once per piece
    pairs.dedup();
    pairs
}

#[test]
fn random_games_keep_history_and_position_in_step() {
    for seed in 0..8u64 {
        let mut rng = SmallRng::seed_from_u64(0xD0E1_B0A2 ^ seed);
        let mut c = GameController::default();
        for ply in 0..120usize {
            if c.status() != GameStatus::Ongoing { break; }
            let pairs = legal_pairs(&c);
            assert!(!pairs.is_empty(), "ongoing game without moves (seed={seed})");

            // An illegal attempt first: nothing may change.
            let from = Square::index(rng.gen_range(0..64));
            let to = Square::index(rng.gen_range(0..64));
            if !pairs.contains(&(from, to)) {
                let pos = c.position().clone();
                assert!(c.on_drop(from, to).is_none(), "{from}{to} accepted (seed={seed})");
                assert_eq!(c.position(), &pos);
                assert_eq!(c.history().len(), ply);
            }

            let (from, to) = pairs[rng.gen_range(0..pairs.len())];
            let use_click = rng.gen_bool(0.5);
            let entry = if use_click {
                c.on_square_click(from);
                c.on_square_click(to)
            } else {
                c.on_drop(from, to)
            };
            let entry = entry.unwrap_or_else(|| panic!("legal {from}{to} rejected (seed={seed}, ply={ply})"));
            assert_eq!((entry.from, entry.to), (from, to));
            assert_eq!(c.history().len(), ply + 1);
            assert_eq!(c.position(), &c.engine().position());
            assert_eq!(c.history(), c.engine().history());
            if use_click { assert_eq!(c.selection(), None); }
        }
    }
}
