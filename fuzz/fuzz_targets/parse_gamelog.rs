#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate swap_poker;
use std::str;
use swap_poker::gamelog::{Street, parse};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        // Whatever parses has to answer every ledger question without
        // panicking.
        if let Ok(rounds) = parse(s) {
            for round in &rounds {
                let last = round.last_betting_round();
                assert_eq!(last == Street::Showdown, round.fold().is_none());
                for player in 0..2 {
                    for idx in 0..=4 {
                        let street = Street::from_index(idx).unwrap();
                        let _ = round.round_cost(street, player);
                        let _ = round.continue_cost(street, player);
                    }
                    let _ = round.hole_cards(Street::River, player);
                }
                let _ = round.swaps();
            }
        }
    }
});
