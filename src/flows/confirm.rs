// src/flows/confirm.rs

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::task::JoinHandle;

pub const LABEL_IDLE: &str = "Registrar Pago";
pub const LABEL_ARMED: &str = "¿Confirmar Registro?";
pub const LABEL_SUBMITTING: &str = "Registrando...";

pub const DEFAULT_CONFIRM_WINDOW: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    Idle,
    Armed,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Primeiro clique: aguardando a confirmação.
    Armed,
    /// Segundo clique dentro da janela: pode enviar.
    Proceed,
    /// Já existe um envio em andamento.
    Ignored,
}

#[derive(Debug)]
struct Inner {
    state: ConfirmState,
    // Cada armação ganha uma época; o timer só desarma a sua própria
    epoch: u64,
}

/// Botão de confirmação em dois cliques.
///
/// `Idle -> Armed` no primeiro clique, `Armed -> Submitting` no segundo,
/// `Armed -> Idle` quando a janela expira e `Submitting -> Idle` em
/// [`ConfirmGuard::finish`]. O timer é uma task do tokio cancelada em
/// `reset`, `finish` e no `Drop`, então precisa de um runtime ativo.
#[derive(Debug)]
pub struct ConfirmGuard {
    inner: Arc<Mutex<Inner>>,
    window: Duration,
    timer: Option<JoinHandle<()>>,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ConfirmGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: ConfirmState::Idle,
                epoch: 0,
            })),
            window,
            timer: None,
        }
    }

    pub fn state(&self) -> ConfirmState {
        lock(&self.inner).state
    }

    pub fn label(&self) -> &'static str {
        match self.state() {
            ConfirmState::Idle => LABEL_IDLE,
            ConfirmState::Armed => LABEL_ARMED,
            ConfirmState::Submitting => LABEL_SUBMITTING,
        }
    }

    pub fn click(&mut self) -> ClickOutcome {
        let mut inner = lock(&self.inner);
        let state = inner.state;
        match state {
            ConfirmState::Idle => {
                inner.state = ConfirmState::Armed;
                inner.epoch += 1;
                let epoch = inner.epoch;
                drop(inner);

                self.cancel_timer();
                self.timer = Some(self.spawn_timer(epoch));
                tracing::debug!("Confirmación armada ({} ms)", self.window.as_millis());
                ClickOutcome::Armed
            }
            ConfirmState::Armed => {
                inner.state = ConfirmState::Submitting;
                drop(inner);

                self.cancel_timer();
                ClickOutcome::Proceed
            }
            ConfirmState::Submitting => ClickOutcome::Ignored,
        }
    }

    /// Fim do envio (sucesso ou falha).
    pub fn finish(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.cancel_timer();
        let mut inner = lock(&self.inner);
        inner.state = ConfirmState::Idle;
        inner.epoch += 1;
    }

    fn spawn_timer(&self, epoch: u64) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        let window = self.window;

        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let mut inner = lock(&inner);
            if inner.state == ConfirmState::Armed && inner.epoch == epoch {
                inner.state = ConfirmState::Idle;
                tracing::debug!("Confirmación expirada");
            }
        })
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }
}

impl Default for ConfirmGuard {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_WINDOW)
    }
}

impl Drop for ConfirmGuard {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn first_click_arms_and_window_expires() {
        let mut guard = ConfirmGuard::default();
        assert_eq!(guard.label(), LABEL_IDLE);

        assert_eq!(guard.click(), ClickOutcome::Armed);
        assert_eq!(guard.label(), LABEL_ARMED);

        sleep(Duration::from_millis(4999)).await;
        assert_eq!(guard.state(), ConfirmState::Armed);

        sleep(Duration::from_millis(2)).await;
        assert_eq!(guard.state(), ConfirmState::Idle);
        assert_eq!(guard.label(), LABEL_IDLE);
    }

    #[tokio::test(start_paused = true)]
    async fn second_click_inside_window_proceeds() {
        let mut guard = ConfirmGuard::default();
        guard.click();
        sleep(Duration::from_millis(3000)).await;

        assert_eq!(guard.click(), ClickOutcome::Proceed);
        assert_eq!(guard.label(), LABEL_SUBMITTING);
        assert_eq!(guard.click(), ClickOutcome::Ignored);

        // O timer antigo não pode derrubar o envio em andamento
        sleep(Duration::from_millis(6000)).await;
        assert_eq!(guard.state(), ConfirmState::Submitting);

        guard.finish();
        assert_eq!(guard.state(), ConfirmState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_does_not_disarm_a_new_arming() {
        let mut guard = ConfirmGuard::default();
        guard.click();
        sleep(Duration::from_millis(4000)).await;
        guard.reset();

        guard.click();
        sleep(Duration::from_millis(2000)).await;
        // 6s desde a primeira armação, 2s desde a segunda
        assert_eq!(guard.state(), ConfirmState::Armed);
    }
}
