//! GBN 仿真
//!
//! 把输入文件经由 A→B 的不可靠信道可靠地传送，B 收到的数据写入输出文件。

use clap::Parser;
use gbnsim_rs::config::SimConfig;
use gbnsim_rs::net::GbnWorld;
use gbnsim_rs::sim::{SimTime, Simulator};
use gbnsim_rs::viz::VizLogger;
use std::fs;
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "gbn-sim",
    about = "Go-Back-N 仿真：A 经不可靠信道把文件可靠地传给 B"
)]
struct Args {
    /// 要传送的文件
    #[arg(long)]
    input: PathBuf,

    /// B 收到的数据写到这里
    #[arg(long, default_value = "output.dat")]
    output: PathBuf,

    /// JSON 配置文件；下面的参数会覆盖其中的字段
    #[arg(long)]
    config: Option<PathBuf>,

    /// 丢包概率 [0, 1]
    #[arg(long)]
    loss: Option<f64>,

    /// 损坏概率 [0, 1]
    #[arg(long)]
    corrupt: Option<f64>,

    /// 上层 message 平均到达间隔（时间单位）
    #[arg(long)]
    interval: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// 发送窗口大小
    #[arg(long)]
    window: Option<u32>,

    /// 序号空间大小（至少为窗口的两倍）
    #[arg(long)]
    seq_space: Option<u32>,

    /// 重传超时（时间单位）
    #[arg(long)]
    timeout: Option<f64>,

    /// 发送缓冲上限（message 数）
    #[arg(long)]
    max_backlog: Option<usize>,

    /// 只运行到该时间（时间单位）；默认运行到事件队列为空
    #[arg(long)]
    until: Option<f64>,

    /// 输出事件 JSON
    #[arg(long)]
    viz_json: Option<PathBuf>,
}

fn build_config(args: &Args) -> Result<SimConfig, String> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::load(path).map_err(|e| e.to_string())?,
        None => SimConfig::default(),
    };
    if let Some(v) = args.loss {
        cfg.loss_prob = v;
    }
    if let Some(v) = args.corrupt {
        cfg.corrupt_prob = v;
    }
    if let Some(v) = args.interval {
        cfg.mean_interval = v;
    }
    if let Some(v) = args.seed {
        cfg.seed = v;
    }
    if let Some(v) = args.window {
        cfg.gbn.window = v;
    }
    if let Some(v) = args.seq_space {
        cfg.gbn.seq_space = v;
    }
    if let Some(v) = args.timeout {
        cfg.gbn.rto = v;
    }
    if let Some(v) = args.max_backlog {
        cfg.gbn.max_backlog = v;
    }
    cfg.validate().map_err(|e| e.to_string())?;
    Ok(cfg)
}

fn fail(msg: impl std::fmt::Display) -> ! {
    error!(%msg, "gbn-sim failed");
    eprintln!("error: {msg}");
    process::exit(2);
}

fn main() {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = build_config(&args).unwrap_or_else(|e| fail(e));
    let input = fs::read(&args.input)
        .unwrap_or_else(|e| fail(format!("could not open input file {}: {e}", args.input.display())));

    info!(
        loss = cfg.loss_prob,
        corrupt = cfg.corrupt_prob,
        interval = cfg.mean_interval,
        seed = cfg.seed,
        window = cfg.gbn.window,
        seq_space = cfg.gbn.seq_space,
        rto = cfg.gbn.rto,
        input_bytes = input.len(),
        "配置"
    );

    let mut sim = Simulator::default();
    let mut world = GbnWorld::from_config(&cfg, input);

    if args.viz_json.is_some() {
        world.net.viz = Some(VizLogger::default());
        world
            .net
            .emit_viz_meta(cfg.gbn.window, cfg.gbn.seq_space, cfg.gbn.rto);
    }

    world.start(&mut sim);
    match args.until {
        Some(until) => sim.run_until(SimTime::from_units_f64(until), &mut world),
        None => sim.run(&mut world),
    }

    if let Err(e) = fs::write(&args.output, world.net.delivered_bytes()) {
        fail(format!("could not write output file {}: {e}", args.output.display()));
    }

    if let Some(path) = &args.viz_json {
        if let Some(v) = &world.net.viz {
            let json = serde_json::to_string_pretty(&v.events)
                .unwrap_or_else(|e| fail(format!("serialize viz events: {e}")));
            if let Err(e) = fs::write(path, json) {
                fail(format!("could not write {}: {e}", path.display()));
            }
        }
    }

    let stats = &world.net.stats;
    let a = world.a.stats();
    println!(
        " Simulator terminated at time {}\n after sending {} msgs from layer5",
        sim.now(),
        stats.msgs_from_layer5
    );
    println!(
        "to_layer3={} lost={} corrupted={} rejected_msgs={} delivered_msgs={} delivered_bytes={} retransmissions={} timeouts={}",
        stats.to_layer3,
        stats.lost,
        stats.corrupted,
        stats.rejected_msgs,
        stats.delivered_msgs,
        stats.delivered_bytes,
        a.retransmissions,
        a.timeouts
    );

    // 被拒绝的 message 不会出现在输出文件中
    if stats.rejected_msgs > 0 {
        warn!(rejected = stats.rejected_msgs, "output is incomplete");
        eprintln!(
            "warning: {} of {} messages were rejected by a full sender backlog; {} is incomplete",
            stats.rejected_msgs,
            stats.msgs_from_layer5,
            args.output.display()
        );
        process::exit(1);
    }
}
