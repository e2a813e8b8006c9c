use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_CREDITS: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", quota_message(*required))]
pub struct QuotaExhausted {
    pub required: u32,
    pub remaining: u32,
}

fn quota_message(required: u32) -> String {
    if required <= 1 {
        "Você não tem créditos suficientes para gerar uma nova imagem. Por favor, recarregue ou tente mais tarde.".to_string()
    } else {
        format!("Você não tem créditos suficientes para gerar {required} imagem(ns). Por favor, recarregue ou tente mais tarde.")
    }
}

/// Per-session generation budget. Checked before any call, charged only for
/// images that actually came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditGate {
    remaining: u32,
}

impl Default for CreditGate {
    fn default() -> Self {
        Self::new(DEFAULT_CREDITS)
    }
}

impl CreditGate {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn ensure(&self, required: u32) -> Result<(), QuotaExhausted> {
        if self.remaining == 0 || self.remaining < required {
            return Err(QuotaExhausted { required, remaining: self.remaining });
        }
        Ok(())
    }

    pub fn consume(&mut self, count: u32) {
        self.remaining = self.remaining.saturating_sub(count);
    }
}
