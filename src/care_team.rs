//! 护理团队：按 provider id 去重的已选医生集合
//!
//! 成员判断只看 id；保留加入顺序仅用于展示。

use serde::Serialize;

use crate::agents::ProviderResult;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CareTeam {
    members: Vec<ProviderResult>,
}

impl CareTeam {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入医生；id 已存在时不做任何改动，返回 false
    pub fn add(&mut self, provider: ProviderResult) -> bool {
        if self.contains(&provider.id) {
            return false;
        }
        self.members.push(provider);
        true
    }

    /// 移除医生；不存在时为空操作，返回 false
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|p| p.id != id);
        self.members.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|p| p.id == id)
    }

    pub fn members(&self) -> &[ProviderResult] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
