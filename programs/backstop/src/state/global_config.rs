use num::FromPrimitive;

use crate::{BackstopError, Decimal, GlobalConfig, GlobalConfigOption};

impl Default for GlobalConfig {
    fn default() -> GlobalConfig {
        GlobalConfig {
            version: 0,
            is_provide_allowed: true,
            provide_limit: 0,
        }
    }
}

impl GlobalConfig {
    pub fn update(&mut self, key: u16, value: u64) -> Result<GlobalConfigOption, BackstopError> {
        match GlobalConfigOption::from_u16(key) {
            Some(GlobalConfigOption::IsProvideAllowed) => {
                self.is_provide_allowed = value > 0;
                Ok(GlobalConfigOption::IsProvideAllowed)
            }
            Some(GlobalConfigOption::ProvideLimit) => {
                self.provide_limit = value;
                Ok(GlobalConfigOption::ProvideLimit)
            }
            None => Err(BackstopError::GlobalConfigKeyError),
        }
    }

    pub fn provide_limit(&self) -> Option<Decimal> {
        match self.provide_limit {
            0 => None,
            limit => Some(Decimal::from_units(limit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BackstopError, Decimal, GlobalConfig, GlobalConfigOption};

    #[test]
    fn test_global_config_update() {
        let mut config = GlobalConfig::default();
        assert!(config.is_provide_allowed);
        assert_eq!(config.provide_limit(), None);

        assert_eq!(
            config.update(0, 0).unwrap(),
            GlobalConfigOption::IsProvideAllowed
        );
        assert!(!config.is_provide_allowed);

        config.update(1, 5_000).unwrap();
        assert_eq!(config.provide_limit(), Some(Decimal::from_units(5_000)));

        assert_eq!(config.update(7, 1), Err(BackstopError::GlobalConfigKeyError));
    }
}
