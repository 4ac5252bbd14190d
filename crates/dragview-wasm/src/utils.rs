//! ユーティリティモジュール
//!
//! DOMイベント値の変換、エラー変換などのヘルパー関数

use std::fmt::Display;

use dragview_renderer::MouseButton;
use wasm_bindgen::JsValue;

/// `MouseEvent.button` を MouseButton に変換
pub fn button_from_dom(button: i16) -> Option<MouseButton> {
    match button {
        0 => Some(MouseButton::Left),
        1 => Some(MouseButton::Middle),
        2 => Some(MouseButton::Right),
        _ => None,
    }
}

/// `KeyboardEvent.key` を1文字のキーに変換
/// Named keys such as "Shift" or "ArrowUp" yield `None`.
pub fn key_from_dom(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// エラーをJS側の例外に変換
pub fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// 列優先の行列をフラットな配列に変換
pub fn mat4_to_vec(matrix: &[[f32; 4]; 4]) -> Vec<f32> {
    matrix.iter().flatten().copied().collect()
}
