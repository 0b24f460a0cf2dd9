//! Browser WebSocket transport for the live channel.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures::channel::{mpsc, oneshot};
use futures::Stream;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use super::LiveConnector;
use crate::error::{ClientError, Result};

/// Connects through `web_sys::WebSocket`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebSocketConnector;

/// Text frames from an open socket. Dropping it closes the socket.
pub struct WebSocketFrames {
    socket: WebSocket,
    receiver: mpsc::UnboundedReceiver<Result<String>>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl Stream for WebSocketFrames {
    type Item = Result<String>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl Drop for WebSocketFrames {
    fn drop(&mut self) {
        self.socket.set_onmessage(None);
        self.socket.set_onerror(None);
        self.socket.set_onclose(None);
        let _ = self.socket.close();
    }
}

impl LiveConnector for WebSocketConnector {
    type Frames = WebSocketFrames;

    async fn connect(&self, url: &str) -> Result<WebSocketFrames> {
        let socket = WebSocket::new(url)
            .map_err(|e| ClientError::Live(format!("failed to open {url}: {e:?}")))?;
        let (sender, receiver) = mpsc::unbounded();

        // Resolves on the first of open, error or close.
        let (opened_tx, opened_rx) = oneshot::channel::<bool>();
        let opened_tx = Arc::new(Mutex::new(Some(opened_tx)));

        let on_open = {
            let opened_tx = Arc::clone(&opened_tx);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                if let Some(tx) = opened_tx.lock().unwrap().take() {
                    let _ = tx.send(true);
                }
            })
        };
        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_message = {
            let sender = sender.clone();
            Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
                if let Some(text) = event.data().as_string() {
                    let _ = sender.unbounded_send(Ok(text));
                }
            })
        };
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_error = {
            let sender = sender.clone();
            let opened_tx = Arc::clone(&opened_tx);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                if let Some(tx) = opened_tx.lock().unwrap().take() {
                    let _ = tx.send(false);
                }
                let _ = sender.unbounded_send(Err(ClientError::Live("socket error".into())));
                sender.close_channel();
            })
        };
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let on_close = {
            let opened_tx = Arc::clone(&opened_tx);
            Closure::<dyn FnMut(CloseEvent)>::new(move |_: CloseEvent| {
                if let Some(tx) = opened_tx.lock().unwrap().take() {
                    let _ = tx.send(false);
                }
                sender.close_channel();
            })
        };
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let opened = opened_rx.await.unwrap_or(false);
        socket.set_onopen(None);
        drop(on_open);

        let frames = WebSocketFrames {
            socket,
            receiver,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
        };
        if opened {
            Ok(frames)
        } else {
            Err(ClientError::Live(format!("could not connect to {url}")))
        }
    }
}
