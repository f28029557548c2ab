use serde::{Deserialize, Serialize};

pub const MALE_AVATAR: &str = "https://lh3.googleusercontent.com/aida-public/AB6AXuCkjWqv77lVXjzPkIc194kK8lzlFgE7VRWCOfYdkw3dUFed5MNcvOq1H6NUeCuasaLA8xoJU8MOH6FwE32Tp90CnocdW5K8Io_kQLQbey_Q19RRvFMtG1y2YtljjO0mzEep1qd0WZJ5wFyJ0SjOlYMj0xJPFP5RfsD0sroQHpoac2Dsk2cOzvNpvClXl9QzGpqUnEzyaYqD-QDv0EAds1YWp1FKa3CpZcvpsuf85uKQHnxcp-fp0PILaTdPuKfY8gxNPz9sAtCrTQPr";
pub const FEMALE_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/6997/6997662.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn default_avatar(self) -> &'static str {
        match self {
            Gender::Male => MALE_AVATAR,
            Gender::Female => FEMALE_AVATAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    pub notifications: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self { notifications: true }
    }
}

/// Learner identity card. Every field defaults to the demo profile, so a
/// partially stored record never breaks a reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub id: String,
    pub class: String,
    pub school: String,
    pub gender: Gender,
    pub avatar: String,
    pub join_date: String,
    pub date_of_birth: String,
    pub settings: ProfileSettings,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Nguyễn Minh Anh".to_string(),
            id: "HS-2023-889".to_string(),
            class: "Lớp 8A1".to_string(),
            school: "THCS Chu Văn An".to_string(),
            gender: Gender::Male,
            avatar: MALE_AVATAR.to_string(),
            join_date: "01/09/2023".to_string(),
            date_of_birth: "15/08/2010".to_string(),
            settings: ProfileSettings::default(),
        }
    }
}
