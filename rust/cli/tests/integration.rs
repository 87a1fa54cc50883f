#![deny(missing_debug_implementations, unused_must_use)]
#![warn(clippy::all)]
mod helpers;
mod integration {
    mod blackjack_session;
    mod commands_basic;
    mod config_precedence;
    mod poker_session;
}
