/*!
# Connection Hub

The reactor shared by both server flavors. A current-thread runtime drives
all I/O from one thread: the accept loop registers each client with an
outbox channel and a fresh session, a reader task per client parses the
line protocol and dispatches commands, and a writer task per client drains
the outbox onto the socket. Pool and pipeline workers never touch a socket;
they deliver results by sending into the requester's outbox.

Graph mutations are acknowledged to every connected client. MST requests
are validated and built synchronously under the session lock, then handed
to the [`Dispatcher`]; the report reaches the requester asynchronously.
*/

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, error, info, warn};

use crate::core::error::{Result, SpantreeError};
use crate::core::metrics;
use crate::core::mst::mst_strategy;
use crate::core::paths;
use crate::core::types::Graph;
use crate::runtime::leader_follower::LeaderFollowerPool;
use crate::runtime::pipeline::{Pipeline, StageFn};
use crate::server::command::{parse_command, parse_edge_line, Command};
use crate::server::config::ServerConfig;
use crate::server::session::{ClientTx, MstReport, Session, SharedSession};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The stage functions of the metric pipeline, in pipeline order: counts and
/// total weight, longest path, average distance, all shortest paths, and
/// finally delivery to the requester.
///
/// The metric stages read the distance matrices the MST strategies cached on
/// the tree, so no stage recomputes paths.
pub fn metric_stages() -> Vec<StageFn<MstReport>> {
    vec![
        Box::new(|report: &mut MstReport| {
            let line = format!(
                "Graph with {} vertices and {} edges\nTotal weight of edges: {}\n",
                report.mst.num_vertices(),
                report.mst.num_edges(),
                report.mst.total_weight()
            );
            report.message.push_str(&line);
        }),
        Box::new(|report: &mut MstReport| {
            if let Some((dist, _)) = report.mst.paths() {
                let line = metrics::longest_path_report(dist);
                report.message.push_str(&line);
                report.message.push('\n');
            }
        }),
        Box::new(|report: &mut MstReport| {
            if let Some((dist, _)) = report.mst.paths() {
                let line = format!(
                    "The average distance between vertices is: {:.2}\n",
                    metrics::avg_distance(dist)
                );
                report.message.push_str(&line);
            }
        }),
        Box::new(|report: &mut MstReport| {
            if let Some((dist, parents)) = report.mst.paths() {
                let text = paths::all_shortest_paths(dist, parents);
                report.message.push_str(&text);
            }
        }),
        Box::new(|report: &mut MstReport| {
            let message = std::mem::take(&mut report.message);
            let _ = report.client.send(message);
        }),
    ]
}

/// Where MST work goes after the reactor has built the tree.
pub enum Dispatcher {
    /// One task formats the whole report and sends it.
    LeaderFollower(LeaderFollowerPool),
    /// Each stage appends one metric; the tail stage sends.
    Pipeline(Pipeline<MstReport>),
}

impl Dispatcher {
    /// A started Leader-Follower pool with the given worker count.
    pub fn leader_follower(workers: usize) -> Self {
        let pool = LeaderFollowerPool::new(workers);
        pool.start();
        Dispatcher::LeaderFollower(pool)
    }

    /// A started metric pipeline.
    pub fn pipeline() -> Self {
        let pipeline = Pipeline::new(metric_stages());
        pipeline.start();
        Dispatcher::Pipeline(pipeline)
    }

    pub fn flavor(&self) -> &'static str {
        match self {
            Dispatcher::LeaderFollower(_) => "leader-follower",
            Dispatcher::Pipeline(_) => "pipeline",
        }
    }

    /// Hands a computed tree off for report generation and delivery.
    pub fn dispatch(&self, mst: Graph, strategy: &str, client: ClientTx) {
        let message = format!("MST computed using {} strategy\n", strategy);
        match self {
            Dispatcher::LeaderFollower(pool) => {
                pool.add_task(Box::new(move || {
                    let mut report = message;
                    report.push_str(&metrics::stats(&mst));
                    let _ = client.send(report);
                }));
            }
            Dispatcher::Pipeline(pipeline) => {
                pipeline.add_task(MstReport {
                    mst,
                    message,
                    client,
                });
            }
        }
    }

    /// Stops the underlying pool or pipeline and joins its workers.
    pub fn stop(&self) {
        match self {
            Dispatcher::LeaderFollower(pool) => pool.stop(),
            Dispatcher::Pipeline(pipeline) => pipeline.stop(),
        }
    }
}

struct ClientHandle {
    tx: ClientTx,
    session: SharedSession,
}

#[derive(Default)]
struct HubState {
    next_client_id: u64,
    clients: HashMap<u64, ClientHandle>,
}

/// Everything a reader task needs to serve one client.
struct ClientCtx {
    id: u64,
    tx: ClientTx,
    session: SharedSession,
    hub: Arc<Mutex<HubState>>,
    dispatcher: Arc<Dispatcher>,
}

/// A bound listening socket plus the shared hub state.
pub struct Server {
    listener: TcpListener,
    hub: Arc<Mutex<HubState>>,
    dispatcher: Arc<Dispatcher>,
    banner: String,
}

impl Server {
    /// Binds the listener. Failing to bind is fatal for the binaries, which
    /// exit with code 1.
    pub async fn bind(
        config: &ServerConfig,
        dispatcher: Dispatcher,
        banner: impl Into<String>,
    ) -> Result<Self> {
        let listener = TcpListener::bind(config.bind_addr()).await?;
        info!(
            addr = %config.bind_addr(),
            flavor = dispatcher.flavor(),
            "listening"
        );
        Ok(Self {
            listener,
            hub: Arc::new(Mutex::new(HubState::default())),
            dispatcher: Arc::new(dispatcher),
            banner: banner.into(),
        })
    }

    /// The bound address; useful when the configured port was 0.
    pub fn local_addr(&self) -> Result<std::net::SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accepts clients forever. An error from the listener itself is logged
    /// and propagated, tearing the server down.
    pub async fn serve(&self) -> Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    error!(%err, "listener accept failed");
                    return Err(err.into());
                }
            };
            let (read_half, write_half) = stream.into_split();
            let (tx, rx) = unbounded_channel();
            let session: SharedSession = Arc::new(Mutex::new(Session::new()));

            let id = {
                let mut hub = lock(&self.hub);
                hub.next_client_id += 1;
                let id = hub.next_client_id;
                hub.clients.insert(
                    id,
                    ClientHandle {
                        tx: tx.clone(),
                        session: Arc::clone(&session),
                    },
                );
                id
            };
            info!(client = id, %peer, "new connection");
            let _ = tx.send(self.banner.clone());

            tokio::spawn(writer_task(write_half, rx));

            let ctx = ClientCtx {
                id,
                tx,
                session,
                hub: Arc::clone(&self.hub),
                dispatcher: Arc::clone(&self.dispatcher),
            };
            tokio::spawn(async move {
                if let Err(err) = handle_client(&ctx, read_half).await {
                    warn!(client = ctx.id, %err, "client handler error");
                }
                let mut hub = lock(&ctx.hub);
                hub.clients.remove(&ctx.id);
                info!(client = ctx.id, "disconnected");
            });
        }
    }

    /// Serves until SIGINT, then performs best-effort cleanup: sessions and
    /// their graphs are released and the pool or pipeline is stopped.
    pub async fn run_until_shutdown(self) -> Result<()> {
        tokio::select! {
            result = self.serve() => result,
            _ = tokio::signal::ctrl_c() => {
                info!("interrupt received, shutting down");
                self.shutdown();
                Ok(())
            }
        }
    }

    fn shutdown(&self) {
        lock(&self.hub).clients.clear();
        self.dispatcher.stop();
    }
}

async fn writer_task(mut write_half: OwnedWriteHalf, mut rx: UnboundedReceiver<String>) {
    while let Some(message) = rx.recv().await {
        if write_half.write_all(message.as_bytes()).await.is_err() {
            break;
        }
    }
}

/// Sends a mutation acknowledgement to every connected client. A client
/// whose outbox is gone is skipped; the broadcast continues.
fn broadcast(hub: &Mutex<HubState>, message: &str) {
    let hub = lock(hub);
    for client in hub.clients.values() {
        let _ = client.tx.send(message.to_string());
    }
}

fn send_error(ctx: &ClientCtx, err: &SpantreeError) {
    let _ = ctx.tx.send(format!("error: {}\n", err));
}

async fn handle_client(ctx: &ClientCtx, read_half: OwnedReadHalf) -> std::io::Result<()> {
    let mut lines = BufReader::new(read_half).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(command) => {
                debug!(client = ctx.id, ?command, "dispatching command");
                execute_command(ctx, command, &mut lines).await?;
            }
            Err(err) => send_error(ctx, &err),
        }
    }
    Ok(())
}

async fn execute_command(
    ctx: &ClientCtx,
    command: Command,
    lines: &mut Lines<BufReader<OwnedReadHalf>>,
) -> std::io::Result<()> {
    match command {
        Command::NewGraph { vertices, edges } => {
            lock(&ctx.session).replace_graph(Graph::with_vertices(vertices));
            let _ = ctx.tx.send("enter edge: u v w\n".to_string());

            for _ in 0..edges {
                let Some(line) = lines.next_line().await? else {
                    // Disconnected mid-seed; the outer loop observes EOF next.
                    return Ok(());
                };
                let seeded = parse_edge_line(&line).and_then(|(u, v, w)| {
                    lock(&ctx.session)
                        .graph_mut()?
                        .add_weighted_edge(u - 1, v - 1, w)
                });
                if let Err(err) = seeded {
                    send_error(ctx, &err);
                    return Ok(());
                }
            }
            broadcast(
                &ctx.hub,
                &format!(
                    "Client {} created a new graph with {} vertices and {} edges\n",
                    ctx.id, vertices, edges
                ),
            );
        }
        Command::NewEdge { u, v, weight } => {
            let added = lock(&ctx.session)
                .graph_mut()
                .and_then(|graph| graph.add_weighted_edge(u - 1, v - 1, weight));
            match added {
                Ok(()) => broadcast(
                    &ctx.hub,
                    &format!(
                        "Client {} added an edge from {} to {} with weight {}\n",
                        ctx.id, u, v, weight
                    ),
                ),
                Err(err) => send_error(ctx, &err),
            }
        }
        Command::RemoveEdge { u, v } => {
            let removed = lock(&ctx.session)
                .graph_mut()
                .map(|graph| graph.remove_edge(u - 1, v - 1));
            match removed {
                // Removal is idempotent; an absent edge still acknowledges.
                Ok(_) => broadcast(
                    &ctx.hub,
                    &format!(
                        "Client {} removed the edge from {} to {}\n",
                        ctx.id, u, v
                    ),
                ),
                Err(err) => send_error(ctx, &err),
            }
        }
        Command::Mst { strategy } => match build_mst(&ctx.session, &strategy) {
            Ok(mst) => {
                info!(client = ctx.id, %strategy, "MST request dispatched");
                ctx.dispatcher.dispatch(mst, &strategy, ctx.tx.clone());
            }
            Err(err) if err.is_internal() => {
                // Preconditions were checked; reaching this is a bug.
                error!(client = ctx.id, %err, "aborting on internal invariant");
                std::process::abort();
            }
            Err(err) => send_error(ctx, &err),
        },
    }
    Ok(())
}

/// Validates the session's graph and builds the MST synchronously under the
/// session lock.
fn build_mst(session: &SharedSession, strategy_name: &str) -> Result<Graph> {
    let strategy = mst_strategy(strategy_name)?;
    let session = lock(session);
    let graph = session.graph()?;
    if !graph.is_connected() {
        return Err(SpantreeError::NotConnected);
    }
    strategy.minimum_spanning_tree(graph)
}
