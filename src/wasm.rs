//! Browser bindings. Values cross the boundary as plain JS objects via
//! `serde-wasm-bindgen`; rejected moves come back as `{ kind, detail }`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::Match;
use crate::record::MatchRecord;
use crate::types::PlayerId;

#[wasm_bindgen]
pub struct WasmMatch {
    inner: Match,
}

#[wasm_bindgen]
impl WasmMatch {
    #[wasm_bindgen(constructor)]
    pub fn new(dark: String, light: String, wager: u64) -> WasmMatch {
        WasmMatch {
            inner: Match::new(PlayerId::from(dark), PlayerId::from(light), wager),
        }
    }

    /// Rebuilds a match from its JSON record.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<WasmMatch, JsValue> {
        let record = MatchRecord::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let inner = Match::from_record(record).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WasmMatch { inner })
    }

    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner
            .to_record()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn start(&mut self) -> bool {
        self.inner.start()
    }

    #[wasm_bindgen(js_name = isPlayerTurn)]
    pub fn is_player_turn(&self, player: &str) -> bool {
        self.inner.is_player_turn(&PlayerId::from(player))
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self, row: u8, col: u8) -> Result<JsValue, JsValue> {
        to_js(&self.inner.legal_moves(row, col))
    }

    #[wasm_bindgen(js_name = allLegalMoves)]
    pub fn all_legal_moves(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.all_legal_moves())
    }

    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(
        &mut self,
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    ) -> Result<JsValue, JsValue> {
        match self.inner.apply_move(from_row, from_col, to_row, to_col) {
            Ok(outcome) => to_js(&outcome),
            Err(err) => Err(to_js(&err.report())?),
        }
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.state())
    }
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}
