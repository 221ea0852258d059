//! Live dashboard stream over SSE

use crate::api::rest::state::AppState;
use crate::error::ApiResult;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::stream::{self, Stream};
use pulse_runtime::ObserverSession;
use pulse_types::DashboardEvent;
use std::collections::VecDeque;
use std::convert::Infallible;
use tokio::sync::{broadcast::error::RecvError, watch};

struct StreamState {
    session: ObserverSession,
    pending: VecDeque<DashboardEvent>,
    shutdown: watch::Receiver<bool>,
}

/// Stream dashboard events via SSE.
///
/// Sends `history-snapshot` and `alert-history` first, then every live
/// event. The observer is counted until the client disconnects.
pub async fn stream_events(
    State(state): State<AppState>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let session = state.engine.connect()?;
    let pending = session.catch_up().into_iter().collect();

    let initial = StreamState {
        session,
        pending,
        shutdown: state.shutdown.clone(),
    };

    let stream = stream::unfold(initial, |mut st| async move {
        if let Some(event) = st.pending.pop_front() {
            return Some((Ok(to_sse(&event)), st));
        }

        let received = loop {
            tokio::select! {
                received = st.session.recv() => break received,
                changed = st.shutdown.changed() => {
                    if changed.is_err() || *st.shutdown.borrow() {
                        return None;
                    }
                }
            }
        };

        match received {
            Ok(event) => Some((Ok(to_sse(&event)), st)),
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "SSE observer lagged behind");
                Some((Ok(Event::default().comment("lagged")), st))
            }
            Err(RecvError::Closed) => None,
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::new().interval(state.keep_alive).text("ping")))
}

fn to_sse(event: &DashboardEvent) -> Event {
    match event.payload_json() {
        Ok(json) => Event::default().event(event.name()).data(json),
        Err(err) => {
            tracing::warn!(event = event.name(), error = %err, "Failed to encode event");
            Event::default().comment("encode-error")
        }
    }
}
