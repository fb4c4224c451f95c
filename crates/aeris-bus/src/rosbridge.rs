//! 网关客户端（rosbridge 风格协议）
//!
//! 通过中转网关进程访问同一台仿真无人机。协议为 TCP 上按行分隔的
//! JSON 文档，每个文档带 `op` 标签：
//!
//! - 出站：`advertise` / `publish` / `subscribe` / `call_service`
//! - 入站：`publish`（订阅回送）/ `service_response`
//!
//! 速度消息的线格式与中间件一致：
//! `{"linear": {"x", "y", "z"}, "angular": {"x", "y", "z"}}`。
//!
//! # 线程模型
//!
//! 写方向在调用者线程上同步进行；读方向由一个后台 reader 线程驱动，
//! 负责把入站 `publish` 分发给订阅回调、把 `service_response` 按调用
//! id 路由给阻塞等待的调用者。连接断开后所有挂起调用立即失败，
//! 后续写操作返回 [`BusError::Disconnected`]。
//!
//! 没有重连逻辑：网关死了就是死了，由调用方决定是否重建客户端。

use crate::{BusError, DroneBus, SubscriberFn};
use aeris_msgs::{
    CompressedImage, Float64, GetModelStateRequest, GetModelStateResponse, ImuSample,
    SetModelStateRequest, TopicMessage, Twist, topics,
};
use crossbeam_channel::{Receiver, Sender, bounded};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// 服务响应的默认等待时长
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// 出站协议消息
#[derive(Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ClientOp<'a> {
    Advertise {
        topic: &'a str,
        #[serde(rename = "type")]
        msg_type: &'a str,
    },
    Publish {
        topic: &'a str,
        msg: serde_json::Value,
    },
    Subscribe {
        topic: &'a str,
        #[serde(rename = "type")]
        msg_type: &'a str,
    },
    CallService {
        id: &'a str,
        service: &'a str,
        args: serde_json::Value,
    },
}

/// 入站协议消息
#[derive(Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum ServerOp {
    Publish {
        topic: String,
        msg: serde_json::Value,
    },
    ServiceResponse {
        id: String,
        #[serde(default)]
        values: serde_json::Value,
        #[serde(default = "default_true")]
        result: bool,
    },
}

fn default_true() -> bool {
    true
}

/// 服务调用结果（reader 线程 -> 调用者）
struct ServiceReply {
    values: serde_json::Value,
    result: bool,
}

struct Subscription {
    msg_type: String,
    callback: SubscriberFn,
}

/// reader 线程与调用者共享的状态
struct Shared {
    subscriptions: Mutex<HashMap<String, Subscription>>,
    pending: Mutex<HashMap<String, Sender<ServiceReply>>>,
    connected: AtomicBool,
}

impl Shared {
    /// 按话题类型把 JSON 消息还原为 [`TopicMessage`]
    fn decode_msg(msg_type: &str, msg: serde_json::Value) -> Result<TopicMessage, BusError> {
        let decoded = match msg_type {
            topics::TWIST_TYPE => TopicMessage::Twist(serde_json::from_value::<Twist>(msg)?),
            topics::FLOAT64_TYPE => {
                TopicMessage::Float64(serde_json::from_value::<Float64>(msg)?)
            },
            topics::COMPRESSED_IMAGE_TYPE => {
                TopicMessage::CompressedImage(serde_json::from_value::<CompressedImage>(msg)?)
            },
            topics::IMU_TYPE => TopicMessage::Imu(serde_json::from_value::<ImuSample>(msg)?),
            other => {
                return Err(BusError::Service {
                    service: other.to_string(),
                    message: "unknown topic type".to_string(),
                });
            },
        };
        Ok(decoded)
    }

    fn handle_line(&self, line: &str) {
        let op: ServerOp = match serde_json::from_str(line) {
            Ok(op) => op,
            Err(e) => {
                warn!("Dropping malformed gateway message: {}", e);
                return;
            },
        };

        match op {
            ServerOp::Publish { topic, msg } => {
                let mut subscriptions = self.subscriptions.lock();
                let Some(sub) = subscriptions.get_mut(&topic) else {
                    trace!("Inbound message on unsubscribed topic '{}'", topic);
                    return;
                };
                match Self::decode_msg(&sub.msg_type, msg) {
                    Ok(decoded) => (sub.callback)(&decoded),
                    Err(e) => warn!("Dropping undecodable message on '{}': {}", topic, e),
                }
            },
            ServerOp::ServiceResponse { id, values, result } => {
                let sender = self.pending.lock().remove(&id);
                match sender {
                    // 接收端可能已超时放弃，忽略发送失败
                    Some(tx) => {
                        let _ = tx.send(ServiceReply { values, result });
                    },
                    None => warn!("Service response for unknown call id '{}'", id),
                }
            },
        }
    }
}

/// 网关客户端连接
///
/// 实现 [`DroneBus`]，可直接作为句柄层的传输。
pub struct RosbridgeClient {
    stream: TcpStream,
    shared: Arc<Shared>,
    reader: Option<JoinHandle<()>>,
    advertised: HashSet<String>,
    next_call_id: AtomicU64,
    call_timeout: Duration,
}

impl RosbridgeClient {
    /// 连接网关进程
    ///
    /// # 参数
    /// - `addr`: 网关地址（如 "127.0.0.1:9090"）
    ///
    /// # 错误
    /// - `BusError::Io`: TCP 连接失败
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self, BusError> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let shared = Arc::new(Shared {
            subscriptions: Mutex::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
            connected: AtomicBool::new(true),
        });

        let reader_stream = stream.try_clone()?;
        let reader_shared = shared.clone();
        let reader = std::thread::Builder::new()
            .name("aeris-gateway-reader".to_string())
            .spawn(move || reader_loop(reader_stream, reader_shared))?;

        debug!("Connected to gateway");
        Ok(RosbridgeClient {
            stream,
            shared,
            reader: Some(reader),
            advertised: HashSet::new(),
            next_call_id: AtomicU64::new(0),
            call_timeout: DEFAULT_CALL_TIMEOUT,
        })
    }

    /// 设置服务调用超时（默认 5 秒）
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    /// 当前连接是否存活
    pub fn is_connected(&self) -> bool {
        self.shared.connected.load(Ordering::Acquire)
    }

    fn send_op(&mut self, op: &ClientOp<'_>) -> Result<(), BusError> {
        if !self.is_connected() {
            return Err(BusError::Disconnected);
        }
        let mut line = serde_json::to_vec(op)?;
        line.push(b'\n');
        if let Err(e) = self.stream.write_all(&line) {
            self.shared.connected.store(false, Ordering::Release);
            return Err(BusError::Io(e));
        }
        Ok(())
    }

    /// 首次向某话题发布前补发 advertise
    fn ensure_advertised(&mut self, topic: &str, msg_type: &str) -> Result<(), BusError> {
        if self.advertised.contains(topic) {
            return Ok(());
        }
        self.send_op(&ClientOp::Advertise { topic, msg_type })?;
        self.advertised.insert(topic.to_string());
        Ok(())
    }

    /// 同步服务调用（阻塞直到响应或超时）
    fn call_service(
        &mut self,
        service: &str,
        args: serde_json::Value,
    ) -> Result<serde_json::Value, BusError> {
        let call_no = self.next_call_id.fetch_add(1, Ordering::Relaxed);
        let id = format!("call_{service}_{call_no}");

        let (tx, rx): (Sender<ServiceReply>, Receiver<ServiceReply>) = bounded(1);
        self.shared.pending.lock().insert(id.clone(), tx);

        if let Err(e) = self.send_op(&ClientOp::CallService {
            id: &id,
            service,
            args,
        }) {
            self.shared.pending.lock().remove(&id);
            return Err(e);
        }

        match rx.recv_timeout(self.call_timeout) {
            Ok(reply) if reply.result => Ok(reply.values),
            Ok(reply) => Err(BusError::Service {
                service: service.to_string(),
                message: reply
                    .values
                    .get("status_message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("rejected by peer")
                    .to_string(),
            }),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => {
                self.shared.pending.lock().remove(&id);
                Err(BusError::Timeout)
            },
            // reader 线程退出时丢弃所有挂起发送端
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => Err(BusError::Disconnected),
        }
    }

    fn msg_type_of(msg: &TopicMessage) -> &'static str {
        match msg {
            TopicMessage::Twist(_) => topics::TWIST_TYPE,
            TopicMessage::Float64(_) => topics::FLOAT64_TYPE,
            TopicMessage::CompressedImage(_) => topics::COMPRESSED_IMAGE_TYPE,
            TopicMessage::Imu(_) => topics::IMU_TYPE,
        }
    }
}

fn reader_loop(stream: TcpStream, shared: Arc<Shared>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        match line {
            Ok(line) if line.is_empty() => continue,
            Ok(line) => shared.handle_line(&line),
            Err(e) => {
                warn!("Gateway reader error: {}", e);
                break;
            },
        }
    }

    shared.connected.store(false, Ordering::Release);
    // 丢弃挂起调用的发送端，阻塞中的调用者立即收到 Disconnected
    shared.pending.lock().clear();
    debug!("Gateway reader exited");
}

impl DroneBus for RosbridgeClient {
    fn publish(&mut self, topic: &str, msg: &TopicMessage) -> Result<(), BusError> {
        let msg_type = Self::msg_type_of(msg);
        self.ensure_advertised(topic, msg_type)?;
        // TopicMessage 的序列化即为中间件消息形状（untagged）
        let value = serde_json::to_value(msg)?;
        trace!(topic, "publish");
        self.send_op(&ClientOp::Publish { topic, msg: value })
    }

    fn set_model_state(&mut self, req: &SetModelStateRequest) -> Result<(), BusError> {
        let args = serde_json::to_value(req)?;
        self.call_service(topics::SET_MODEL_STATE_SERVICE, args)?;
        Ok(())
    }

    fn get_model_state(
        &mut self,
        req: &GetModelStateRequest,
    ) -> Result<GetModelStateResponse, BusError> {
        let args = serde_json::to_value(req)?;
        let values = self.call_service(topics::GET_MODEL_STATE_SERVICE, args)?;
        let resp: GetModelStateResponse = serde_json::from_value(values)?;
        if !resp.success {
            return Err(BusError::Service {
                service: topics::GET_MODEL_STATE_SERVICE.to_string(),
                message: resp.status_message,
            });
        }
        Ok(resp)
    }

    fn subscribe(&mut self, topic: &str, callback: SubscriberFn) -> Result<(), BusError> {
        // 订阅类型由话题名推断：目前只有相机和 IMU 两类入站话题
        let msg_type = if topic.ends_with("/compressed") {
            topics::COMPRESSED_IMAGE_TYPE
        } else if topic.ends_with("/imu") {
            topics::IMU_TYPE
        } else {
            topics::TWIST_TYPE
        };

        self.shared.subscriptions.lock().insert(
            topic.to_string(),
            Subscription {
                msg_type: msg_type.to_string(),
                callback,
            },
        );
        self.send_op(&ClientOp::Subscribe { topic, msg_type })
    }
}

impl Drop for RosbridgeClient {
    fn drop(&mut self) {
        self.shared.connected.store(false, Ordering::Release);
        // 关闭套接字让 reader 线程从阻塞读里退出
        let _ = self.stream.shutdown(Shutdown::Both);
        if let Some(handle) = self.reader.take()
            && handle.join().is_err()
        {
            warn!("Gateway reader thread panicked during shutdown");
        }
    }
}
