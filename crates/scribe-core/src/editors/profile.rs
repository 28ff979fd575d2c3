use super::split_csv;
use crate::model::ProfileData;
use crate::validation::validate_profile;
use crate::ScribeResult;

/// A single-field update to the patient's demographics.
#[derive(Clone, Debug, PartialEq)]
pub enum DemographicsField {
    DateOfBirth(String),
    Gender(String),
    Age(Option<String>),
    CountryCode(String),
}

/// A single-field update to the patient's biometrics.
///
/// Values are stored as given. Non-finite or negative numbers are caught by `save`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BiometricsField {
    Height(f64),
    Weight(f64),
    Bmi(f64),
    HealthScore(f64),
}

/// A single-field update to the primary doctor's details.
#[derive(Clone, Debug, PartialEq)]
pub enum DoctorField {
    Name(String),
    Specialty(String),
    ClinicName(String),
    PhoneNumber(String),
}

/// Draft of the patient profile.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileEditor {
    draft: ProfileData,
}

impl ProfileEditor {
    pub fn new(profile: ProfileData) -> Self {
        Self { draft: profile }
    }

    pub fn profile(&self) -> &ProfileData {
        &self.draft
    }

    pub fn update_demographics(&mut self, field: DemographicsField) {
        let demographics = &mut self.draft.demographics;
        match field {
            DemographicsField::DateOfBirth(date) => demographics.date_of_birth = date,
            DemographicsField::Gender(gender) => demographics.gender = gender,
            DemographicsField::Age(age) => demographics.age = age,
            DemographicsField::CountryCode(code) => demographics.location.country_code = code,
        }
    }

    pub fn update_biometrics(&mut self, field: BiometricsField) {
        let biometrics = &mut self.draft.lifestyle.biometrics;
        match field {
            BiometricsField::Height(value) => biometrics.height = value,
            BiometricsField::Weight(value) => biometrics.weight = value,
            BiometricsField::Bmi(value) => biometrics.bmi = value,
            BiometricsField::HealthScore(value) => biometrics.health_score = value,
        }
    }

    pub fn set_blood_type(&mut self, blood_type: impl Into<String>) {
        self.draft.genetic_proxies.blood_type = blood_type.into();
    }

    /// Replaces medication sensitivities from comma-separated input.
    ///
    /// Items are trimmed, empty items dropped and repeats removed, keeping first occurrence.
    pub fn set_sensitivities_csv(&mut self, input: &str) {
        let mut sensitivities: Vec<String> = Vec::new();
        for item in split_csv(input) {
            if !sensitivities.contains(&item) {
                sensitivities.push(item);
            }
        }
        self.draft.genetic_proxies.medication_sensitivities = sensitivities;
    }

    /// Replaces chronic conditions from comma-separated input.
    pub fn set_chronic_conditions_csv(&mut self, input: &str) {
        self.draft.clinical_status.chronic_conditions = split_csv(input).collect();
    }

    pub fn update_primary_doctor(&mut self, field: DoctorField) {
        let doctor = &mut self.draft.clinical_status.care_team.primary_doctor;
        match field {
            DoctorField::Name(name) => doctor.name = name,
            DoctorField::Specialty(specialty) => doctor.specialty = specialty,
            DoctorField::ClinicName(clinic) => doctor.clinic_name = clinic,
            DoctorField::PhoneNumber(phone) => doctor.phone_number = phone,
        }
    }

    pub fn set_circadian_rhythm(&mut self, rhythm: impl Into<String>) {
        self.draft.lifestyle.circadian_rhythm = rhythm.into();
    }

    /// Returns the profile to commit.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if a biometric is negative or not finite, or the
    /// health score is outside `0..=100`.
    pub fn save(&self) -> ScribeResult<ProfileData> {
        validate_profile(&self.draft)?;
        Ok(self.draft.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_scribe_data;
    use crate::ScribeError;

    fn editor() -> ProfileEditor {
        ProfileEditor::new(sample_scribe_data().unwrap().note.profile_data)
    }

    #[test]
    fn test_sensitivities_are_deduplicated() {
        let mut editor = editor();
        editor.set_sensitivities_csv("Penicillin, codeine ,Penicillin,, ");

        assert_eq!(
            editor.profile().genetic_proxies.medication_sensitivities,
            vec!["Penicillin", "codeine"]
        );
    }

    #[test]
    fn test_chronic_conditions_csv() {
        let mut editor = editor();
        editor.set_chronic_conditions_csv("Asthma,  Eczema");

        assert_eq!(
            editor.profile().clinical_status.chronic_conditions,
            vec!["Asthma", "Eczema"]
        );

        editor.set_chronic_conditions_csv("");
        assert!(editor.profile().clinical_status.chronic_conditions.is_empty());
    }

    #[test]
    fn test_demographics_and_doctor_updates() {
        let mut editor = editor();
        editor.update_demographics(DemographicsField::Gender("male".into()));
        editor.update_demographics(DemographicsField::CountryCode("IE".into()));
        editor.update_demographics(DemographicsField::Age(None));
        editor.update_primary_doctor(DoctorField::PhoneNumber("+353 1 555 0100".into()));
        editor.set_blood_type("AB-");
        editor.set_circadian_rhythm("night shift");

        let saved = editor.save().unwrap();
        assert_eq!(saved.demographics.gender, "male");
        assert_eq!(saved.demographics.location.country_code, "IE");
        assert!(saved.demographics.age.is_none());
        assert_eq!(
            saved.clinical_status.care_team.primary_doctor.phone_number,
            "+353 1 555 0100"
        );
        assert_eq!(saved.genetic_proxies.blood_type, "AB-");
        assert_eq!(saved.lifestyle.circadian_rhythm, "night shift");
    }

    #[test]
    fn test_save_rejects_bad_biometrics() {
        let mut editor = editor();
        editor.update_biometrics(BiometricsField::HealthScore(120.0));
        assert!(matches!(editor.save(), Err(ScribeError::Validation(_))));

        editor.update_biometrics(BiometricsField::HealthScore(80.0));
        editor.update_biometrics(BiometricsField::Height(f64::NAN));
        assert!(editor.save().is_err());

        editor.update_biometrics(BiometricsField::Height(170.0));
        editor.update_biometrics(BiometricsField::Bmi(23.4));
        let saved = editor.save().unwrap();
        assert_eq!(saved.lifestyle.biometrics.height, 170.0);
        assert_eq!(saved.lifestyle.biometrics.health_score, 80.0);
    }
}
