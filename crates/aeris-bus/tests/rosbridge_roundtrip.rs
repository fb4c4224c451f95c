//! RosbridgeClient 集成测试
//!
//! 用进程内 TcpListener 扮演网关，逐行校验客户端发出的协议文档，
//! 并模拟网关方向的响应与推送。

use aeris_bus::{BusError, DroneBus, RosbridgeClient};
use aeris_msgs::{
    GetModelStateRequest, ImuSample, ModelState, Pose, Quaternion, SetModelStateRequest,
    TopicMessage, Twist, Vector3, topics,
};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::time::Duration;

/// 假网关：接受一条连接，把解析出的每行 JSON 交给处理闭包，
/// 闭包返回的每行响应写回客户端。
fn spawn_gateway(
    handler: impl FnMut(serde_json::Value) -> Vec<String> + Send + 'static,
) -> (String, std::thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let handle = std::thread::spawn(move || {
        let mut handler = handler;
        let (stream, _) = listener.accept().expect("accept");
        let mut writer = stream.try_clone().expect("clone stream");
        let reader = BufReader::new(stream);
        for line in reader.lines() {
            let Ok(line) = line else { break };
            if line.is_empty() {
                continue;
            }
            let value: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
            for reply in handler(value) {
                writer.write_all(reply.as_bytes()).expect("write reply");
                writer.write_all(b"\n").expect("write newline");
            }
        }
    });

    (addr, handle)
}

#[test]
fn test_publish_advertises_once() {
    let (tx, rx) = mpsc::channel::<serde_json::Value>();
    let (addr, gateway) = spawn_gateway(move |value| {
        tx.send(value).expect("forward");
        Vec::new()
    });

    let mut client = RosbridgeClient::connect(&addr).expect("connect");
    let topic = topics::cmd_vel("uav1");
    let twist = TopicMessage::Twist(Twist::new(
        Vector3::new(0.5, 0.0, 0.0),
        Vector3::ZERO,
    ));

    client.publish(&topic, &twist).expect("first publish");
    client.publish(&topic, &twist).expect("second publish");

    let first = rx.recv_timeout(Duration::from_secs(2)).expect("advertise");
    assert_eq!(first["op"], "advertise");
    assert_eq!(first["topic"], "/uav1/cmd_vel");
    assert_eq!(first["type"], "geometry_msgs/Twist");

    let second = rx.recv_timeout(Duration::from_secs(2)).expect("publish 1");
    assert_eq!(second["op"], "publish");
    assert_eq!(second["msg"]["linear"]["x"], 0.5);

    // 第二次发布不再 advertise
    let third = rx.recv_timeout(Duration::from_secs(2)).expect("publish 2");
    assert_eq!(third["op"], "publish");

    drop(client);
    gateway.join().expect("gateway exit");
}

#[test]
fn test_get_model_state_roundtrip() {
    let (addr, gateway) = spawn_gateway(|value| {
        if value["op"] != "call_service" {
            return Vec::new();
        }
        assert_eq!(value["service"], "/gazebo/get_model_state");
        assert_eq!(value["args"]["model_name"], "uav1");
        let id = value["id"].as_str().expect("call id").to_string();
        let response = serde_json::json!({
            "op": "service_response",
            "id": id,
            "result": true,
            "values": {
                "pose": {
                    "position": { "x": 1.0, "y": 2.0, "z": 3.0 },
                    "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 },
                },
                "twist": {
                    "linear": { "x": 0.0, "y": 0.0, "z": 0.0 },
                    "angular": { "x": 0.0, "y": 0.0, "z": 0.0 },
                },
                "success": true,
                "status_message": "",
            },
        });
        vec![response.to_string()]
    });

    let mut client = RosbridgeClient::connect(&addr).expect("connect");
    let resp = client
        .get_model_state(&GetModelStateRequest::in_world_frame("uav1"))
        .expect("get_model_state");

    assert_eq!(resp.pose.position, Vector3::new(1.0, 2.0, 3.0));
    assert_eq!(resp.pose.orientation, Quaternion::IDENTITY);

    drop(client);
    gateway.join().expect("gateway exit");
}

#[test]
fn test_set_model_state_rejection_is_service_error() {
    let (addr, gateway) = spawn_gateway(|value| {
        if value["op"] != "call_service" {
            return Vec::new();
        }
        let id = value["id"].as_str().expect("call id").to_string();
        let response = serde_json::json!({
            "op": "service_response",
            "id": id,
            "result": false,
            "values": { "status_message": "model 'ghost' does not exist" },
        });
        vec![response.to_string()]
    });

    let mut client = RosbridgeClient::connect(&addr).expect("connect");
    let state = ModelState::new("ghost", Pose::ZERO, Twist::ZERO);
    let err = client
        .set_model_state(&SetModelStateRequest::new(state))
        .expect_err("rejected call");

    match err {
        BusError::Service { service, message } => {
            assert_eq!(service, "/gazebo/set_model_state");
            assert!(message.contains("does not exist"));
        },
        other => panic!("Expected Service error, got {other}"),
    }

    drop(client);
    gateway.join().expect("gateway exit");
}

#[test]
fn test_service_call_timeout() {
    // 网关收下请求但永不响应
    let (addr, _gateway) = spawn_gateway(|_| Vec::new());

    let mut client = RosbridgeClient::connect(&addr)
        .expect("connect")
        .with_call_timeout(Duration::from_millis(100));
    let err = client
        .get_model_state(&GetModelStateRequest::in_world_frame("uav1"))
        .expect_err("timeout");
    assert!(matches!(err, BusError::Timeout));
}

#[test]
fn test_subscription_delivers_inbound_messages() {
    let topic = topics::imu("uav1");
    let push_topic = topic.clone();
    let (addr, gateway) = spawn_gateway(move |value| {
        if value["op"] != "subscribe" {
            return Vec::new();
        }
        assert_eq!(value["type"], "sensor_msgs/Imu");
        let push = serde_json::json!({
            "op": "publish",
            "topic": push_topic,
            "msg": {
                "orientation": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 },
                "angular_velocity": { "x": 0.0, "y": 0.0, "z": 0.1 },
                "linear_acceleration": { "x": 0.0, "y": 0.0, "z": 9.81 },
            },
        });
        vec![push.to_string()]
    });

    let (tx, rx) = mpsc::channel::<ImuSample>();
    let mut client = RosbridgeClient::connect(&addr).expect("connect");
    client
        .subscribe(
            &topic,
            Box::new(move |msg| {
                if let TopicMessage::Imu(sample) = msg {
                    tx.send(*sample).expect("forward sample");
                }
            }),
        )
        .expect("subscribe");

    let sample = rx.recv_timeout(Duration::from_secs(2)).expect("imu sample");
    assert!((sample.angular_velocity.z - 0.1).abs() < 1e-12);
    assert!((sample.linear_acceleration.z - 9.81).abs() < 1e-12);

    drop(client);
    gateway.join().expect("gateway exit");
}

#[test]
fn test_disconnect_fails_pending_and_future_calls() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr").to_string();

    let gateway = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        // 读到第一条请求就直接断开
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        let mut line = String::new();
        let _ = reader.read_line(&mut line);
        drop(stream);
    });

    let mut client = RosbridgeClient::connect(&addr).expect("connect");
    let err = client
        .get_model_state(&GetModelStateRequest::in_world_frame("uav1"))
        .expect_err("disconnected call");
    assert!(matches!(err, BusError::Disconnected | BusError::Timeout));

    gateway.join().expect("gateway exit");

    // reader 线程退出后，后续写操作也应失败
    let twist = TopicMessage::Twist(Twist::ZERO);
    let mut last = Ok(());
    for _ in 0..20 {
        last = client.publish(&topics::cmd_vel("uav1"), &twist);
        if last.is_err() {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert!(last.is_err());
}
