use chrono::{NaiveDateTime, TimeZone, Utc};
use insurance::InsurancePlan;
use intake::{has_text, pointer_in_range, Address, Claim, ClaimLine};
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::control::ControlNumbers;
use super::segment::{fixed_width, Segment, COMPONENT_SEPARATOR, REPETITION_SEPARATOR};
use super::{EdiDocument, EncodeError, SubmitterConfig};

const IMPLEMENTATION_GUIDE: &str = "005010X222A1";
const INTERCHANGE_VERSION: &str = "00501";
/// Lines may point at no more than four diagnoses.
const MAX_POINTERS: usize = 4;

/// Builds 837P professional claim interchanges.
#[derive(Debug, Clone, Default)]
pub struct Edi837Encoder {
    config: SubmitterConfig,
}

/// Mandatory data pulled out of a claim once it has been checked.
struct Required<'a> {
    claim_number: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    provider_name: &'a str,
    npi: &'a str,
    diagnoses: Vec<String>,
}

impl Edi837Encoder {
    pub fn new(config: SubmitterConfig) -> Edi837Encoder {
        Edi837Encoder { config }
    }

    pub fn config(&self) -> &SubmitterConfig {
        &self.config
    }

    /// Encodes with fresh control numbers stamped at the current time.
    pub fn generate(&self, claim: &Claim, plan: &InsurancePlan) -> Result<EdiDocument, EncodeError> {
        self.generate_with(claim, plan, ControlNumbers::next(), Utc::now().naive_utc())
    }

    pub fn generate_with(
        &self,
        claim: &Claim,
        plan: &InsurancePlan,
        controls: ControlNumbers,
        at: NaiveDateTime,
    ) -> Result<EdiDocument, EncodeError> {
        let required = check_required(claim)?;
        let date = at.format("%Y%m%d").to_string();
        let time = at.format("%H%M").to_string();

        let mut transaction = vec![
            Segment::new("ST")
                .element("837")
                .element(&controls.transaction)
                .element(IMPLEMENTATION_GUIDE),
            Segment::new("BHT")
                .element("0019")
                .element("00")
                .element(&claim.id)
                .element(&date)
                .element(&time)
                .element("CH"),
        ];
        transaction.extend(self.submitter_loops());
        transaction.extend(billing_provider_loop(claim, &required));
        transaction.extend(subscriber_loop(claim, plan, &required));
        transaction.extend(patient_loop(plan, &required));
        transaction.extend(claim_loop(claim, &required)?);

        let segment_count = transaction.len() + 1;
        transaction.push(
            Segment::new("SE")
                .element(segment_count.to_string())
                .element(&controls.transaction),
        );

        let mut segments = vec![
            self.interchange_header(&controls.interchange, &date, &time),
            Segment::new("GS")
                .element("HC")
                .element(&self.config.sender_id)
                .element(&self.config.receiver_id)
                .element(&date)
                .element(&time)
                .element(&controls.group)
                .element("X")
                .element(IMPLEMENTATION_GUIDE),
        ];
        segments.extend(transaction);
        segments.push(Segment::new("GE").element("1").element(&controls.group));
        segments.push(Segment::new("IEA").element("1").element(&controls.interchange));

        let content: String = segments.iter().map(Segment::render).collect();
        debug!(
            "encoded claim {} as 837P ({} segments, interchange {})",
            required.claim_number,
            segments.len(),
            controls.interchange
        );

        Ok(EdiDocument {
            id: Uuid::new_v4(),
            claim_id: claim.id.clone(),
            control_numbers: controls,
            created_at: Utc.from_utc_datetime(&at),
            content,
        })
    }

    fn interchange_header(&self, control_number: &str, date: &str, time: &str) -> Segment {
        Segment::new("ISA")
            .raw("00")
            .raw(fixed_width("", 10))
            .raw("00")
            .raw(fixed_width("", 10))
            .raw("ZZ")
            .raw(fixed_width(&self.config.sender_id, 15))
            .raw("ZZ")
            .raw(fixed_width(&self.config.receiver_id, 15))
            .raw(date)
            .raw(time)
            .raw(REPETITION_SEPARATOR.to_string())
            .raw(INTERCHANGE_VERSION)
            .raw(control_number)
            .raw("0")
            .raw(self.config.usage.code())
            .raw(COMPONENT_SEPARATOR.to_string())
    }

    // 1000A submitter, 1000B receiver
    fn submitter_loops(&self) -> Vec<Segment> {
        let mut segments = vec![entity_name("41", "2", &self.config.submitter_name, "46", &self.config.sender_id)];

        let contact = self.config.submitter_contact.as_deref().filter(|c| !c.trim().is_empty());
        let phone = self.config.submitter_phone.as_deref().filter(|p| !p.trim().is_empty());
        if contact.is_some() || phone.is_some() {
            segments.push(contact_segment(contact, phone));
        }

        segments.push(entity_name("40", "2", &self.config.receiver_name, "46", &self.config.receiver_id));
        segments
    }
}

/// Encodes with the default submitter configuration.
pub fn generate_837(claim: &Claim, plan: &InsurancePlan) -> Result<String, EncodeError> {
    Edi837Encoder::default()
        .generate(claim, plan)
        .map(|document| document.content)
}

fn check_required(claim: &Claim) -> Result<Required<'_>, EncodeError> {
    if claim.lines.is_empty() {
        return Err(EncodeError::NoBillableLines);
    }

    let text = |value: &Option<String>, what: &str| -> Result<(), EncodeError> {
        if has_text(value) {
            Ok(())
        } else {
            Err(EncodeError::InvalidClaimData(format!("{} is required", what)))
        }
    };

    text(&claim.claim_number, "claim number")?;
    text(&claim.patient.first_name, "patient first name")?;
    text(&claim.patient.last_name, "patient last name")?;
    text(&claim.provider.name, "billing provider name")?;
    text(&claim.provider.npi, "billing provider NPI")?;

    let diagnoses = claim.diagnosis_codes();
    if diagnoses.is_empty() {
        return Err(EncodeError::InvalidClaimData(
            "at least one diagnosis code is required".to_string(),
        ));
    }

    Ok(Required {
        claim_number: claim.claim_number.as_deref().unwrap_or_default(),
        first_name: claim.patient.first_name.as_deref().unwrap_or_default(),
        last_name: claim.patient.last_name.as_deref().unwrap_or_default(),
        provider_name: claim.provider.name.as_deref().unwrap_or_default(),
        npi: claim.provider.npi.as_deref().unwrap_or_default(),
        diagnoses,
    })
}

// 2000A / 2010AA
fn billing_provider_loop(claim: &Claim, required: &Required<'_>) -> Vec<Segment> {
    let mut segments = vec![
        Segment::new("HL").element("1").empty().element("20").element("1"),
        entity_name("85", "2", required.provider_name, "XX", required.npi),
    ];
    segments.extend(address_segments(&claim.provider.address));

    if let Some(tax_id) = claim.provider.tax_id.as_deref().filter(|t| !t.trim().is_empty()) {
        segments.push(Segment::new("REF").element("EI").element(tax_id.replace('-', "")));
    }
    if let Some(phone) = claim.provider.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        segments.push(contact_segment(None, Some(phone)));
    }
    segments
}

// 2000B / 2010BA / 2010BB
fn subscriber_loop(claim: &Claim, plan: &InsurancePlan, required: &Required<'_>) -> Vec<Segment> {
    let relationship = plan.patient_is_subscriber().then(|| plan.relationship.x12_code());

    let mut segments = vec![
        Segment::new("HL").element("2").element("1").element("22").element("1"),
        Segment::new("SBR")
            .element("P")
            .optional(relationship)
            .optional(plan.group_number.as_deref())
            .optional(plan.group_name.as_deref())
            .empty()
            .empty()
            .empty()
            .empty()
            .element(plan.plan_type.claim_filing_indicator()),
        Segment::new("NM1")
            .element("IL")
            .element("1")
            .element(required.last_name)
            .element(required.first_name)
            .empty()
            .empty()
            .empty()
            .element("MI")
            .element(&plan.member_id),
    ];
    segments.extend(address_segments(&claim.patient.address));

    if let Some(dob) = claim.patient.date_of_birth {
        segments.push(
            Segment::new("DMG")
                .element("D8")
                .element(dob.format("%Y%m%d").to_string())
                .optional(claim.patient.gender.map(|g| g.x12_code())),
        );
    }

    segments.push(entity_name("PR", "2", &plan.payer_name, "PI", &plan.payer_id));
    segments
}

// 2000C / 2010CA
fn patient_loop(plan: &InsurancePlan, required: &Required<'_>) -> Vec<Segment> {
    vec![
        Segment::new("HL").element("3").element("2").element("23").element("0"),
        Segment::new("PAT").element(plan.relationship.x12_code()),
        Segment::new("NM1")
            .element("QC")
            .element("1")
            .element(required.last_name)
            .element(required.first_name),
    ]
}

// 2300 claim, 2400 service lines
fn claim_loop(claim: &Claim, required: &Required<'_>) -> Result<Vec<Segment>, EncodeError> {
    let mut segments = vec![Segment::new("CLM")
        .element(required.claim_number)
        .element(format_amount(claim.total_charge))
        .empty()
        .empty()
        .composite(&[claim.place_of_service.as_str(), "B", "1"])
        .element("Y")
        .element("A")
        .element("Y")
        .element("Y")];

    for code in &required.diagnoses {
        segments.push(Segment::new("HI").composite(&["BK", code.as_str()]));
    }

    for line in &claim.lines {
        let pointers = diagnosis_pointers(line, &required.diagnoses)?;
        let pointer_refs: Vec<&str> = pointers.iter().map(String::as_str).collect();

        segments.push(Segment::new("LX").element(line.line_number.to_string()));
        segments.push(
            Segment::new("SV1")
                .composite(&["HC", line.cpt_code.as_str()])
                .element(format_amount(line.line_total()))
                .element("UN")
                .element(line.units.to_string())
                .empty()
                .empty()
                .composite(&pointer_refs),
        );
        segments.push(
            Segment::new("DTP")
                .element("472")
                .element("D8")
                .element(line.service_date.format("%Y%m%d").to_string()),
        );
    }
    Ok(segments)
}

/// The line's own pointer if it has one (`"12"` or `"1:2"`), otherwise the 1-based positions
/// of its diagnosis codes in the claim-level list. An explicit pointer must name an `HI` entry.
fn diagnosis_pointers(line: &ClaimLine, diagnoses: &[String]) -> Result<Vec<String>, EncodeError> {
    if let Some(parts) = line.pointer_positions() {
        let pointers: Vec<String> = parts.into_iter().take(MAX_POINTERS).collect();
        if let Some(bad) = pointers.iter().find(|p| !pointer_in_range(p, diagnoses.len())) {
            return Err(EncodeError::InvalidClaimData(format!(
                "line {} diagnosis pointer {} is out of range",
                line.line_number, bad
            )));
        }
        return Ok(pointers);
    }

    let mut positions: Vec<String> = Vec::new();
    for code in &line.diagnosis_codes {
        if let Some(index) = diagnoses.iter().position(|d| d == code.trim()) {
            let position = (index + 1).to_string();
            if !positions.contains(&position) {
                positions.push(position);
            }
        }
    }
    positions.truncate(MAX_POINTERS);
    Ok(positions)
}

fn entity_name(entity: &str, kind: &str, name: &str, qualifier: &str, id: &str) -> Segment {
    Segment::new("NM1")
        .element(entity)
        .element(kind)
        .element(name)
        .empty()
        .empty()
        .empty()
        .empty()
        .element(qualifier)
        .element(id)
}

fn contact_segment(name: Option<&str>, phone: Option<&str>) -> Segment {
    let segment = Segment::new("PER").element("IC").optional(name);
    match phone {
        Some(phone) => segment.element("TE").element(phone),
        None => segment,
    }
}

fn address_segments(address: &Option<Address>) -> Vec<Segment> {
    let Some(address) = address else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    if has_text(&address.street) {
        segments.push(Segment::new("N3").optional(address.street.as_deref()));
    }
    if has_text(&address.city) || has_text(&address.state) || has_text(&address.zip) {
        segments.push(
            Segment::new("N4")
                .optional(address.city.as_deref())
                .optional(address.state.as_deref())
                .optional(address.zip.as_deref().map(|zip| zip.replace('-', ""))),
        );
    }
    segments
}

/// Amounts are written at their full precision without trailing zeros or padding.
pub fn format_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}
