//! 进程内回环总线
//!
//! 持有按模型名索引的仿真 ground truth，发布的消息同步分发给本进程内的
//! 订阅者并记录在发布日志里。用途：
//! - 单元/集成测试（对照发布日志断言指令序列）
//! - 作为"原生中间件直连"的进程内替身
//!
//! 句柄克隆共享同一份内部状态，因此测试可以一边驱动句柄、一边用另一个
//! 克隆检查总线上发生了什么。

use crate::{BusError, DroneBus, SubscriberFn};
use aeris_msgs::{
    GetModelStateRequest, GetModelStateResponse, ModelState, SetModelStateRequest, TopicMessage,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct Inner {
    /// 模型名 -> 权威状态
    models: Mutex<HashMap<String, ModelState>>,
    /// 话题 -> 订阅回调
    subscribers: Mutex<HashMap<String, Vec<SubscriberFn>>>,
    /// 发布日志（话题，消息）
    published: Mutex<Vec<(String, TopicMessage)>>,
}

/// 进程内回环总线（克隆共享状态）
#[derive(Clone, Default)]
pub struct LoopbackBus {
    inner: Arc<Inner>,
}

impl LoopbackBus {
    /// 创建空总线（无已知模型）
    pub fn new() -> Self {
        Self::default()
    }

    /// 在仿真命名空间内登记一个模型（初始为零位姿、零速度）
    pub fn spawn_model(&self, model_name: impl Into<String>) {
        let name = model_name.into();
        let state = ModelState::new(name.clone(), Default::default(), Default::default());
        self.inner.models.lock().insert(name, state);
    }

    /// 模拟一条异步到达的入站消息（相机帧、IMU 采样）
    ///
    /// 与 [`DroneBus::publish`] 不同，注入不进发布日志：它代表来自
    /// 仿真器方向的流量，而不是指令方向的流量。
    pub fn inject(&self, topic: &str, msg: &TopicMessage) {
        self.dispatch(topic, msg);
    }

    /// 取走发布日志（清空内部记录）
    pub fn take_published(&self) -> Vec<(String, TopicMessage)> {
        std::mem::take(&mut self.inner.published.lock())
    }

    /// 当前发布日志的副本
    pub fn published(&self) -> Vec<(String, TopicMessage)> {
        self.inner.published.lock().clone()
    }

    /// 读取模型的当前权威状态（测试用）
    pub fn model_state(&self, model_name: &str) -> Option<ModelState> {
        self.inner.models.lock().get(model_name).cloned()
    }

    fn dispatch(&self, topic: &str, msg: &TopicMessage) {
        let mut subscribers = self.inner.subscribers.lock();
        if let Some(callbacks) = subscribers.get_mut(topic) {
            for callback in callbacks.iter_mut() {
                callback(msg);
            }
        }
    }
}

impl DroneBus for LoopbackBus {
    fn publish(&mut self, topic: &str, msg: &TopicMessage) -> Result<(), BusError> {
        self.inner.published.lock().push((topic.to_string(), msg.clone()));
        self.dispatch(topic, msg);
        Ok(())
    }

    fn set_model_state(&mut self, req: &SetModelStateRequest) -> Result<(), BusError> {
        let mut models = self.inner.models.lock();
        let name = &req.model_state.model_name;
        match models.get_mut(name) {
            Some(state) => {
                *state = req.model_state.clone();
                Ok(())
            },
            None => Err(BusError::Service {
                service: aeris_msgs::topics::SET_MODEL_STATE_SERVICE.to_string(),
                message: format!("model '{name}' does not exist"),
            }),
        }
    }

    fn get_model_state(
        &mut self,
        req: &GetModelStateRequest,
    ) -> Result<GetModelStateResponse, BusError> {
        let models = self.inner.models.lock();
        match models.get(&req.model_name) {
            Some(state) => Ok(GetModelStateResponse {
                pose: state.pose,
                twist: state.twist,
                success: true,
                status_message: String::new(),
            }),
            None => Err(BusError::Service {
                service: aeris_msgs::topics::GET_MODEL_STATE_SERVICE.to_string(),
                message: format!("model '{}' does not exist", req.model_name),
            }),
        }
    }

    fn subscribe(&mut self, topic: &str, callback: SubscriberFn) -> Result<(), BusError> {
        self.inner
            .subscribers
            .lock()
            .entry(topic.to_string())
            .or_default()
            .push(callback);
        Ok(())
    }
}
