//! 话题与服务名称构造
//!
//! 所有名称都以模型名为参数构造，库内不保留默认模型名。
//! 仿真器服务名是全局的，与模型无关。

/// 模型状态写入服务
pub const SET_MODEL_STATE_SERVICE: &str = "/gazebo/set_model_state";

/// 模型状态查询服务
pub const GET_MODEL_STATE_SERVICE: &str = "/gazebo/get_model_state";

/// geometry_msgs/Twist 的话题类型名
pub const TWIST_TYPE: &str = "geometry_msgs/Twist";

/// std_msgs/Float64 的话题类型名
pub const FLOAT64_TYPE: &str = "std_msgs/Float64";

/// sensor_msgs/CompressedImage 的话题类型名
pub const COMPRESSED_IMAGE_TYPE: &str = "sensor_msgs/CompressedImage";

/// sensor_msgs/Imu 的话题类型名
pub const IMU_TYPE: &str = "sensor_msgs/Imu";

/// 速度指令话题
pub fn cmd_vel(model: &str) -> String {
    format!("/{model}/cmd_vel")
}

/// 云台 pitch 控制器指令话题
pub fn gimbal_pitch_command(model: &str) -> String {
    format!("/{model}/gimbal_pitch_controller/command")
}

/// 云台 yaw 控制器指令话题
pub fn gimbal_yaw_command(model: &str) -> String {
    format!("/{model}/gimbal_yaw_controller/command")
}

/// 相机压缩图像话题
pub fn camera_compressed(model: &str) -> String {
    format!("/{model}/camera/dji_sdk/image_raw/compressed")
}

/// IMU 话题
pub fn imu(model: &str) -> String {
    format!("/{model}/imu")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_names_embed_model() {
        assert_eq!(cmd_vel("uav1"), "/uav1/cmd_vel");
        assert_eq!(
            gimbal_pitch_command("uav1"),
            "/uav1/gimbal_pitch_controller/command"
        );
        assert_eq!(
            gimbal_yaw_command("quadrotor"),
            "/quadrotor/gimbal_yaw_controller/command"
        );
        assert_eq!(
            camera_compressed("uav1"),
            "/uav1/camera/dji_sdk/image_raw/compressed"
        );
        assert_eq!(imu("uav1"), "/uav1/imu");
    }
}
