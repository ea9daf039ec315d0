//! WebAssembly bindings for the Quintet match engine.
//!
//! This module exposes the engine to JavaScript through wasm-bindgen. The
//! browser client drives single-player games entirely locally: the human
//! submits intents and then asks the built-in opponent to take its turn.
//! All pacing (thinking delays, highlight timing) stays in JavaScript.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::board::Symbol;
#[cfg(feature = "wasm")]
use crate::bot::Bot;
#[cfg(feature = "wasm")]
use crate::game::Match;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed match wrapper. The human plays X; the bot plays O.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmMatch {
    state: Match,
    bot: Bot,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmMatch {
    /// Create a fresh match
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmMatch {
        WasmMatch {
            state: Match::new(),
            bot: Bot::new(Symbol::O),
        }
    }

    /// Get the current snapshot as JSON
    #[wasm_bindgen(js_name = getSnapshot)]
    pub fn get_snapshot(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Submit a placement for the human player (X), returns events JSON
    #[wasm_bindgen(js_name = submitMove)]
    pub fn submit_move(&mut self, row: usize, col: usize) -> Result<String, JsValue> {
        let events = self
            .state
            .apply(Symbol::X, crate::actions::MatchAction::Place { row, col })
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
    }

    /// Submit a removal for the human player (X), returns events JSON
    #[wasm_bindgen(js_name = submitRemoval)]
    pub fn submit_removal(&mut self, row: usize, col: usize) -> Result<String, JsValue> {
        let events = self
            .state
            .apply(Symbol::X, crate::actions::MatchAction::Remove { row, col })
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
    }

    /// Let the built-in opponent (O) take one intent, returns events JSON.
    /// The client calls this again while the bot holds a bonus turn.
    #[wasm_bindgen(js_name = playBotTurn)]
    pub fn play_bot_turn(&mut self) -> Result<String, JsValue> {
        let events = self
            .state
            .play_bot_turn(&mut self.bot)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string()))
    }

    /// Discard the current match and start over, returns the new snapshot
    #[wasm_bindgen(js_name = reset)]
    pub fn reset(&mut self) -> String {
        let snapshot = self.state.reset();
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    /// Current player as "X" or "O"
    #[wasm_bindgen(js_name = getCurrentPlayer)]
    pub fn get_current_player(&self) -> String {
        self.state.current_player().to_string()
    }

    /// Whether the match has ended
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    /// The winner as "X"/"O", or null while the match is live
    #[wasm_bindgen(js_name = getWinner)]
    pub fn get_winner(&self) -> Option<String> {
        self.state.winner().map(|s| s.to_string())
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmMatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_wasm_module_compiles() {
        // This test just verifies the module compiles
        assert!(true);
    }
}
