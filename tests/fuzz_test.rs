//! Totality fuzz: the engine must return a non-empty reply for any input.

mod helpers;

use helpers::default_engine;
use memoria::engine::ConversationContext;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const PERSONALITIES: &[&str] = &["warm", "reflective", "balanced", "humorous", "wise", "bogus", ""];

fn random_message(rng: &mut StdRng) -> String {
    match rng.gen_range(0..6_u32) {
        // Degenerate inputs
        0 => String::new(),
        1 => " \t\n  ".into(),
        // Plausible English
        2 => {
            let words = ["i", "miss", "the", "time", "we", "shared", "love", "hard", "remember"];
            (0..rng.gen_range(1..12))
                .map(|_| words[rng.gen_range(0..words.len())])
                .collect::<Vec<_>>()
                .join(" ")
        }
        // Random ASCII soup
        3 => (0..rng.gen_range(1..200))
            .map(|_| rng.gen_range(b' '..=b'~') as char)
            .collect(),
        // Unicode
        4 => "señora 你好 🌸 grüße ñandú".repeat(rng.gen_range(1..4)),
        // Very long
        _ => "a very long message about nothing in particular ".repeat(100),
    }
}

#[test]
fn generate_is_total_over_arbitrary_inputs() {
    let engine = default_engine();
    let mut rng = StdRng::seed_from_u64(0xFAE);

    for i in 0..1000 {
        let ctx = ConversationContext {
            name: if i % 7 == 0 { String::new() } else { "Grandma Rose".into() },
            description: if i % 3 == 0 { Some("beloved grandmother".into()) } else { None },
            personality: Some(PERSONALITIES[i % PERSONALITIES.len()].to_string()),
            history: None,
            last_message: random_message(&mut rng),
        };

        let reply = engine.generate(&ctx, &mut rng);
        assert!(!reply.is_empty(), "empty reply for input #{i}: {ctx:?}");
        assert!(!reply.contains("{name}"), "leaked placeholder for input #{i}");
        assert!(!reply.contains("{topic}"), "leaked placeholder for input #{i}");
    }
}
