//! Armor stand poses.
//!
//! Java lets every joint of an armor stand rotate freely; Bedrock only knows a
//! fixed list of poses selected by index. [`closest_pose`] maps the former onto
//! the latter.

use mc_bridge_proto::types::Vec3;

/// One of the six posable joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Head,
    Body,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Joint {
    /// Joint carried by a Java metadata field (15 to 20).
    pub fn from_field(field: u8) -> Option<Joint> {
        match field {
            15 => Some(Joint::Head),
            16 => Some(Joint::Body),
            17 => Some(Joint::LeftArm),
            18 => Some(Joint::RightArm),
            19 => Some(Joint::LeftLeg),
            20 => Some(Joint::RightLeg),
            _ => None,
        }
    }
}

/// Java-side joint rotations, `(pitch, yaw, roll)` in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmorStandPose {
    pub head: Vec3,
    pub body: Vec3,
    pub left_arm: Vec3,
    pub right_arm: Vec3,
    pub left_leg: Vec3,
    pub right_leg: Vec3,
}

impl Default for ArmorStandPose {
    /// Vanilla Java defaults for a freshly placed stand.
    fn default() -> Self {
        Self {
            head: Vec3::ZERO,
            body: Vec3::ZERO,
            left_arm: Vec3::new(-10.0, 0.0, -10.0),
            right_arm: Vec3::new(-15.0, 0.0, 10.0),
            left_leg: Vec3::new(-1.0, 0.0, -1.0),
            right_leg: Vec3::new(1.0, 0.0, 1.0),
        }
    }
}

impl ArmorStandPose {
    pub fn get(&self, joint: Joint) -> Vec3 {
        match joint {
            Joint::Head => self.head,
            Joint::Body => self.body,
            Joint::LeftArm => self.left_arm,
            Joint::RightArm => self.right_arm,
            Joint::LeftLeg => self.left_leg,
            Joint::RightLeg => self.right_leg,
        }
    }

    pub fn set(&mut self, joint: Joint, rotation: Vec3) {
        match joint {
            Joint::Head => self.head = rotation,
            Joint::Body => self.body = rotation,
            Joint::LeftArm => self.left_arm = rotation,
            Joint::RightArm => self.right_arm = rotation,
            Joint::LeftLeg => self.left_leg = rotation,
            Joint::RightLeg => self.right_leg = rotation,
        }
    }
}

/// Bedrock armor stand poses. The discriminant is the wire index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedrockArmorStandPose {
    Default = 0,
    None,
    Solemn,
    Athena,
    Brandish,
    Honor,
    Entertain,
    Salute,
    Riposte,
    Zombie,
    CancanA,
    CancanB,
    Hero,
}

const fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

const fn pose(head: Vec3, body: Vec3, left_arm: Vec3, right_arm: Vec3, left_leg: Vec3, right_leg: Vec3) -> ArmorStandPose {
    ArmorStandPose {
        head,
        body,
        left_arm,
        right_arm,
        left_leg,
        right_leg,
    }
}

impl BedrockArmorStandPose {
    /// Every pose, in wire order.
    pub const ALL: [BedrockArmorStandPose; 13] = [
        BedrockArmorStandPose::Default,
        BedrockArmorStandPose::None,
        BedrockArmorStandPose::Solemn,
        BedrockArmorStandPose::Athena,
        BedrockArmorStandPose::Brandish,
        BedrockArmorStandPose::Honor,
        BedrockArmorStandPose::Entertain,
        BedrockArmorStandPose::Salute,
        BedrockArmorStandPose::Riposte,
        BedrockArmorStandPose::Zombie,
        BedrockArmorStandPose::CancanA,
        BedrockArmorStandPose::CancanB,
        BedrockArmorStandPose::Hero,
    ];

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Java joint rotations that look like this pose.
    pub const fn reference(self) -> ArmorStandPose {
        match self {
            Self::Default => pose(v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(-10.0, 0.0, -10.0), v(-15.0, 0.0, 10.0), v(-1.0, 0.0, -1.0), v(1.0, 0.0, 1.0)),
            Self::None => pose(v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0)),
            Self::Solemn => pose(v(15.0, 0.0, 0.0), v(0.0, 0.0, 2.0), v(-30.0, 15.0, 15.0), v(-60.0, -20.0, -10.0), v(-1.0, 0.0, -1.0), v(1.0, 0.0, 1.0)),
            Self::Athena => pose(v(-5.0, 0.0, 0.0), v(0.0, 0.0, 2.0), v(10.0, 0.0, -5.0), v(-60.0, 20.0, -10.0), v(-3.0, -3.0, -3.0), v(3.0, 3.0, 3.0)),
            Self::Brandish => pose(v(-15.0, 0.0, 0.0), v(0.0, 0.0, -2.0), v(20.0, 0.0, -10.0), v(-110.0, 50.0, 0.0), v(5.0, -3.0, -3.0), v(-5.0, 3.0, 3.0)),
            Self::Honor => pose(v(-15.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(-110.0, 35.0, 0.0), v(-110.0, -35.0, 0.0), v(5.0, -3.0, -3.0), v(-5.0, 3.0, 3.0)),
            Self::Entertain => pose(v(-15.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(-110.0, -35.0, 0.0), v(-110.0, 35.0, 0.0), v(5.0, -3.0, -3.0), v(-5.0, 3.0, 3.0)),
            Self::Salute => pose(v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(10.0, 0.0, -5.0), v(-70.0, -40.0, 0.0), v(-1.0, 0.0, -1.0), v(1.0, 0.0, 1.0)),
            Self::Riposte => pose(v(16.0, 20.0, 0.0), v(0.0, 0.0, 0.0), v(4.0, 8.0, 237.0), v(246.0, 0.0, 89.0), v(-14.0, -18.0, -16.0), v(8.0, 20.0, 4.0)),
            Self::Zombie => pose(v(-10.0, 0.0, -5.0), v(0.0, 0.0, 0.0), v(-105.0, 0.0, 0.0), v(-100.0, 0.0, 0.0), v(7.0, 0.0, 0.0), v(-46.0, 0.0, 0.0)),
            Self::CancanA => pose(v(-5.0, 18.0, 0.0), v(0.0, 22.0, 0.0), v(8.0, 0.0, -114.0), v(0.0, 84.0, 111.0), v(-111.0, 55.0, 0.0), v(0.0, 23.0, -13.0)),
            Self::CancanB => pose(v(-10.0, -20.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 0.0, -112.0), v(0.0, 0.0, 112.0), v(0.0, 0.0, 0.0), v(-110.0, -35.0, 0.0)),
            Self::Hero => pose(v(-4.0, 67.0, 0.0), v(0.0, 8.0, 0.0), v(16.0, 32.0, -8.0), v(-99.0, 63.0, 0.0), v(0.0, -75.0, -8.0), v(4.0, 63.0, 8.0)),
        }
    }
}

/// Mean squared joint distance between two poses. Arms only count when
/// `include_arms` is set.
fn mean_distance(a: &ArmorStandPose, b: &ArmorStandPose, include_arms: bool) -> f32 {
    let mut sum = a.head.distance_squared(&b.head)
        + a.body.distance_squared(&b.body)
        + a.left_leg.distance_squared(&b.left_leg)
        + a.right_leg.distance_squared(&b.right_leg);
    if include_arms {
        sum += a.left_arm.distance_squared(&b.left_arm) + a.right_arm.distance_squared(&b.right_arm);
        sum / 6.0
    } else {
        sum / 4.0
    }
}

/// Nearest Bedrock pose to `current`.
///
/// Scans in wire order and only replaces the best match on a strictly smaller
/// distance, so earlier poses win ties. An exact match ends the scan.
pub fn closest_pose(current: &ArmorStandPose, include_arms: bool) -> BedrockArmorStandPose {
    let mut matched = BedrockArmorStandPose::Default;
    let mut matched_distance = f32::MAX;
    for candidate in BedrockArmorStandPose::ALL {
        let distance = mean_distance(&candidate.reference(), current, include_arms);
        if distance < matched_distance {
            matched = candidate;
            matched_distance = distance;
        }
        if distance == 0.0 {
            break;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (i, p) in BedrockArmorStandPose::ALL.iter().enumerate() {
            assert_eq!(p.index(), i as i32);
        }
        assert_eq!(BedrockArmorStandPose::Hero.index(), 12);
    }

    #[test]
    fn java_default_is_bedrock_default() {
        assert_eq!(ArmorStandPose::default(), BedrockArmorStandPose::Default.reference());
        assert_eq!(closest_pose(&ArmorStandPose::default(), true), BedrockArmorStandPose::Default);
    }

    #[test]
    fn every_reference_matches_itself_with_arms() {
        for p in BedrockArmorStandPose::ALL {
            assert_eq!(closest_pose(&p.reference(), true), p);
        }
    }

    #[test]
    fn exact_athena() {
        let athena = BedrockArmorStandPose::Athena.reference();
        assert_eq!(closest_pose(&athena, false).index(), 3);
    }

    #[test]
    fn tie_goes_to_earlier_pose() {
        // Halfway between Default (legs at -1/1) and None (legs at 0).
        let mut current = BedrockArmorStandPose::None.reference();
        current.left_leg = Vec3::new(-0.5, 0.0, -0.5);
        current.right_leg = Vec3::new(0.5, 0.0, 0.5);
        assert_eq!(closest_pose(&current, false), BedrockArmorStandPose::Default);
    }

    #[test]
    fn exact_match_is_not_overridden() {
        // Without arms Salute is indistinguishable from Default, which comes first.
        let salute = BedrockArmorStandPose::Salute.reference();
        assert_eq!(closest_pose(&salute, false), BedrockArmorStandPose::Default);
        assert_eq!(closest_pose(&salute, true), BedrockArmorStandPose::Salute);
    }

    #[test]
    fn nearest_neighbor() {
        let mut current = BedrockArmorStandPose::Zombie.reference();
        current.head = Vec3::new(-9.0, 1.0, -5.0);
        assert_eq!(closest_pose(&current, true), BedrockArmorStandPose::Zombie);
    }

    #[test]
    fn joint_from_field() {
        assert_eq!(Joint::from_field(15), Some(Joint::Head));
        assert_eq!(Joint::from_field(20), Some(Joint::RightLeg));
        assert_eq!(Joint::from_field(14), None);
        let mut p = ArmorStandPose::default();
        p.set(Joint::LeftArm, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p.get(Joint::LeftArm), Vec3::new(1.0, 2.0, 3.0));
    }
}
