#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate arbitrary;
extern crate swap_poker;

use swap_poker::gamelog::{Action, Round, Street};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    button: bool,
    actions: [Vec<Action>; 4],
    awards: [i16; 2],
}

fuzz_target!(|input: Input| {
    // Keep raises small enough that no cost can saturate.
    if input
        .actions
        .iter()
        .flatten()
        .any(|a| a.raise_amount().unsigned_abs() > 1 << 20)
    {
        return;
    }
    let round = Round::new(
        1,
        usize::from(input.button),
        vec![],
        vec![vec![]; 3],
        input.actions.to_vec(),
        input.awards.iter().map(|a| i32::from(*a)).collect(),
    );
    // Most random action lists aren't a legal round. The ones that are
    // must have costs that add up street by street.
    if let Ok(round) = round {
        for player in 0..2 {
            let mut total = 0;
            for street in Street::BETTING {
                total += round.continue_cost(street, player);
                assert_eq!(round.round_cost(street, player), total);
            }
        }
    }
});
