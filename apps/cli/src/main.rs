//! # Aeris CLI
//!
//! 仿真无人机的命令行操作工具，经网关传输连接。
//!
//! ```bash
//! # 前向 1 m/s，带 0.5 rad/s 偏航
//! aeris-cli --model uav1 velocity --linear 1,0,0 --angular 0,0,0.5
//!
//! # 查询 ground truth 位置
//! aeris-cli status
//!
//! # 云台指向正下方（角度输入）
//! aeris-cli gimbal --pitch 90 --yaw 0 --degrees
//!
//! # 保存最近一帧相机图像
//! aeris-cli frame --output frame.png
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

mod commands;

use aeris_sdk::{DroneBuilder, DroneHandle};
use commands::{FrameCommand, GimbalCommand, PoseCommand, VelocityCommand};

/// Aeris CLI - 仿真无人机命令行工具
#[derive(Parser, Debug)]
#[command(name = "aeris-cli")]
#[command(about = "Command-line operator tool for a simulated drone", long_about = None)]
#[command(version)]
struct Cli {
    /// 网关地址
    #[arg(long, default_value = "127.0.0.1:9090", global = true)]
    gateway: String,

    /// 模型名（仿真命名空间）
    #[arg(long, default_value = "uav1", global = true)]
    model: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 下发速度指令
    Velocity {
        #[command(flatten)]
        args: VelocityCommand,
    },

    /// 瞬移到指定位姿
    Pose {
        #[command(flatten)]
        args: PoseCommand,
    },

    /// 设置云台角度
    Gimbal {
        #[command(flatten)]
        args: GimbalCommand,
    },

    /// 查询当前位置与姿态（ground truth）
    Status,

    /// 保存最近一帧相机图像
    Frame {
        #[command(flatten)]
        args: FrameCommand,
    },

    /// 复位到初始悬停状态
    Reset,
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aeris_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    info!(gateway = %cli.gateway, model = %cli.model, "Connecting to gateway");
    let drone = DroneBuilder::new(&cli.model).connect_gateway(&cli.gateway)?;

    match cli.command {
        Commands::Velocity { args } => args.execute(&drone),
        Commands::Pose { args } => args.execute(&drone),
        Commands::Gimbal { args } => args.execute(&drone),
        Commands::Status => commands::status(&drone),
        Commands::Frame { args } => args.execute(&drone),
        Commands::Reset => {
            drone.reset()?;
            println!("Reset complete");
            Ok(())
        },
    }
}
