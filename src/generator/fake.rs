// src/generator/fake.rs
//! Random user generator backed by `rand` and the static locale lists.

use chrono::{Days, Local, Months, NaiveDate};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::locale::{self, Locale};
use super::{GeneratorError, Record, RecordGenerator};
use crate::config::GeneratorConfig;

pub struct FakeUserGenerator {
    locale:  &'static Locale,
    rng:     StdRng,
    min_age: u32,
    max_age: u32,
    today:   NaiveDate,
}

impl FakeUserGenerator {
    /// Build a generator for the configured locale. A configured seed makes
    /// the record stream reproducible; otherwise the OS seeds it.
    pub fn new(cfg: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let locale = locale::find(&cfg.locale)
            .ok_or_else(|| GeneratorError::UnsupportedLocale(cfg.locale.clone()))?;
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        log::debug!("Generator ready: locale={}, seed={:?}", locale.code, cfg.seed);
        Ok(FakeUserGenerator {
            locale,
            rng,
            min_age: cfg.min_age,
            max_age: cfg.max_age,
            today: Local::now().date_naive(),
        })
    }

    /// Pin the reference date used for the age window.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    fn pick(&mut self, list: &'static [&'static str], field: &'static str) -> Result<&'static str, GeneratorError> {
        list.choose(&mut self.rng)
            .copied()
            .ok_or(GeneratorError::EmptyLocaleData { locale: self.locale.code, field })
    }

    /// Uniform date between the day after turning `max_age + 1` and the day of turning `min_age`.
    fn date_of_birth(&mut self) -> Result<NaiveDate, GeneratorError> {
        let (min_age, max_age, today) = (self.min_age, self.max_age, self.today);
        let invalid = || GeneratorError::InvalidDate { min_age, max_age, today };
        let earliest = max_age
            .checked_add(1)
            .and_then(|years| years.checked_mul(12))
            .and_then(|months| today.checked_sub_months(Months::new(months)))
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .ok_or_else(invalid)?;
        let latest = min_age
            .checked_mul(12)
            .and_then(|months| today.checked_sub_months(Months::new(months)))
            .ok_or_else(invalid)?;

        let span = latest.signed_duration_since(earliest).num_days();
        if span < 0 {
            return Err(invalid());
        }
        let offset = self.rng.random_range(0..=span as u64);
        earliest.checked_add_days(Days::new(offset)).ok_or_else(invalid)
    }

    fn email(&mut self) -> Result<String, GeneratorError> {
        let user = self.pick(self.locale.email_names, "email_names")?;
        let domain = self.pick(self.locale.email_domains, "email_domains")?;
        let suffix: u16 = self.rng.random_range(0..1000);
        Ok(format!("{user}{suffix}@{domain}"))
    }

    fn phone_number(&mut self) -> Result<String, GeneratorError> {
        let format = self.pick(self.locale.phone_formats, "phone_formats")?;
        Ok(format
            .chars()
            .map(|c| match c {
                '#' => char::from(b'0' + self.rng.random_range(0..10u8)),
                other => other,
            })
            .collect())
    }
}

impl RecordGenerator for FakeUserGenerator {
    fn generate(&mut self) -> Result<Record, GeneratorError> {
        Ok(Record {
            name:          self.pick(self.locale.first_names, "first_names")?.to_string(),
            country:       self.pick(self.locale.countries, "countries")?.to_string(),
            email:         self.email()?,
            date_of_birth: self.date_of_birth()?,
            phone_number:  self.phone_number()?,
        })
    }
}
