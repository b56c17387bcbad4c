//! 実ソケット上でサーバーを起動するテストユーティリティ

use std::net::SocketAddr;

use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tuckshop_server::{api, AppState};

/// エフェメラルポートで動作中のサーバー
pub struct LiveServer {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl LiveServer {
    /// 127.0.0.1 の空きポートにバインドしてアプリケーションを起動
    pub async fn start(state: AppState) -> Self {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown, signal) = oneshot::channel::<()>();

        let app = api::create_router(state);
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    signal.await.ok();
                })
                .await
        });

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    /// バインド済みアドレス
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// パスから完全なURLを組み立てる
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// グレースフルシャットダウンして終了を待つ
    pub async fn shutdown(self) {
        self.shutdown.send(()).ok();
        self.handle
            .await
            .expect("server task panicked")
            .expect("server exited with an I/O error");
    }
}
