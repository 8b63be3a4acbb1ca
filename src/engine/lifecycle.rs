use crate::catalog::ReleaseCatalog;
use crate::domain::date::{add_months, last_day_of_month};
use crate::domain::{Field, Release, ReleaseType, SiblingRelease};
use crate::error::{PublishError, Result};
use chrono::{Local, NaiveDate};
use tracing::debug;

/// Support window of a major release, also the minor-release floor
pub const MAJOR_SUPPORT_MONTHS: u32 = 36;

/// Minimum support window of a minor release from its own release date
pub const MINOR_SUPPORT_MONTHS: u32 = 18;

/// Guidance period following end of support
pub const GUIDANCE_MONTHS: u32 = 12;

/// Derives end-of-support, end-of-guidance and end-of-availability dates
///
/// Sibling releases are looked up only when a formula needs them. Every computed
/// date is stored on the release, so repeating a computation returns the stored
/// value without touching the catalog again.
pub struct LifecycleDateCalculator<C: ReleaseCatalog> {
    catalog: C,
    today: NaiveDate,
}

impl<C: ReleaseCatalog> LifecycleDateCalculator<C> {
    /// Create a calculator that falls back to the local current date
    pub fn new(catalog: C) -> Self {
        Self::with_today(catalog, Local::now().date_naive())
    }

    /// Create a calculator with a fixed notion of "today"
    pub fn with_today(catalog: C, today: NaiveDate) -> Self {
        LifecycleDateCalculator { catalog, today }
    }

    fn base_date(&self, release: &Release) -> NaiveDate {
        release.release_date.unwrap_or(self.today)
    }

    fn sibling(&self, release: &Release, release_type: ReleaseType) -> Result<Option<SiblingRelease>> {
        self.catalog.latest_release(release.version.major(), release_type)
    }

    /// Compute the end-of-support date
    ///
    /// - Maintenance: end of the month of the previous minor release
    /// - Minor: later of previous major + 36 months and own date + 18 months,
    ///   rounded to the end of the month
    /// - Major, Alpha, Beta: own date + 36 months, rounded to the end of the month
    ///
    /// # Returns
    /// * `Err` - If the release type is unresolved or a required sibling is missing
    pub fn end_of_support(&self, release: &mut Release) -> Result<NaiveDate> {
        if let Field::Concrete(date) = release.end_of_support {
            return Ok(date);
        }

        let release_type = release.release_type.concrete().copied().ok_or_else(|| {
            PublishError::date(format!(
                "Release type of {} must be resolved before computing end of support",
                release.version
            ))
        })?;
        let base = self.base_date(release);

        let date = match release_type {
            ReleaseType::Maintenance => {
                let previous_minor = self.sibling(release, ReleaseType::Minor)?.ok_or_else(|| {
                    PublishError::date(format!(
                        "Current release type: {}, cannot find the previous minor release for major {}",
                        release_type,
                        release.version.major()
                    ))
                })?;
                last_day_of_month(previous_minor.release_date)?
            }
            ReleaseType::Minor => {
                let previous_major = self.sibling(release, ReleaseType::Major)?.ok_or_else(|| {
                    PublishError::date(format!(
                        "Current release type: {}, cannot find the previous major release for major {}",
                        release_type,
                        release.version.major()
                    ))
                })?;
                let from_major = add_months(previous_major.release_date, MAJOR_SUPPORT_MONTHS)?;
                let from_self = add_months(base, MINOR_SUPPORT_MONTHS)?;
                // raw candidates are compared before rounding
                last_day_of_month(from_major.max(from_self))?
            }
            ReleaseType::Major | ReleaseType::Alpha | ReleaseType::Beta => {
                last_day_of_month(add_months(base, MAJOR_SUPPORT_MONTHS)?)?
            }
        };

        debug!("end of support for {}: {}", release.version, date);
        release.end_of_support = Field::Concrete(date);
        Ok(date)
    }

    /// Compute the end-of-guidance date: end of support + 12 months, not rounded
    pub fn end_of_guidance(&self, release: &mut Release) -> Result<NaiveDate> {
        if let Field::Concrete(date) = release.end_of_guidance {
            return Ok(date);
        }

        let end_of_support = self.end_of_support(release)?;
        let date = add_months(end_of_support, GUIDANCE_MONTHS)?;

        debug!("end of guidance for {}: {}", release.version, date);
        release.end_of_guidance = Field::Concrete(date);
        Ok(date)
    }

    /// Compute the end-of-availability date from the offset expression
    ///
    /// Without an offset expression the release date itself is used.
    pub fn end_of_availability(&self, release: &mut Release) -> Result<NaiveDate> {
        if let Field::Concrete(date) = release.end_of_availability {
            return Ok(date);
        }

        let base = self.base_date(release);
        let date = match &release.end_of_availability_offset {
            Some(offset) => offset.apply(base)?,
            None => base,
        };

        debug!("end of availability for {}: {}", release.version, date);
        release.end_of_availability = Field::Concrete(date);
        Ok(date)
    }
}
