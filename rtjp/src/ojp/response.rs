//! From a SOAP response body to a `JourneyResponse`.
//!
//! XML text → plain tree → fault check → sanitize → raw DTOs → domain record.
//! Either the whole response converts or the call fails.

use serde_json::Value;

use crate::domain::JourneyResponse;
use crate::error::Error;
use crate::sanitize::remove_keys_recursively;

use super::convert::{ConversionError, convert_journey_plan};
use super::error::OjpError;
use super::types::RawJourneyPlan;
use super::xml::{RAW_ELEMENTS_KEY, to_value};

/// Keys holding protocol markup rather than response data.
pub const PROTOCOL_ARTIFACT_KEYS: &[&str] = &[RAW_ELEMENTS_KEY];

const RESPONSE_ELEMENT: &str = "RealtimeJourneyPlanResponse";

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Surface a SOAP Fault as a service error.
fn check_fault(body: &Value) -> Result<(), OjpError> {
    match body.get("Fault") {
        Some(fault) => Err(OjpError::Fault {
            code: scalar_text(fault.get("faultcode")),
            message: scalar_text(fault.get("faultstring")),
        }),
        None => Ok(()),
    }
}

/// The SOAP fault carried by `xml`, if it is an envelope holding one.
///
/// Anything else (an HTML error page, broken XML, a normal body) is `None`.
pub fn fault_in(xml: &str) -> Option<OjpError> {
    let tree = to_value(xml).ok()?;
    let body = tree.get("Envelope")?.get("Body")?;
    check_fault(body).err()
}

/// Parse a complete `RealtimeJourneyPlan` SOAP response.
pub fn journey_response_from_xml(xml: &str) -> Result<JourneyResponse, Error> {
    let mut tree = to_value(xml)?;

    let body = tree
        .get_mut("Envelope")
        .and_then(|envelope| envelope.get_mut("Body"))
        .ok_or(ConversionError::MissingField("Envelope.Body"))?;

    check_fault(body)?;

    let mut payload = body
        .get_mut(RESPONSE_ELEMENT)
        .map(Value::take)
        .ok_or(ConversionError::MissingField(RESPONSE_ELEMENT))?;

    remove_keys_recursively(&mut payload, PROTOCOL_ARTIFACT_KEYS);

    // An empty response element means no journeys in either direction.
    if payload.is_null() {
        payload = Value::Object(serde_json::Map::new());
    }

    let raw: RawJourneyPlan =
        serde_json::from_value(payload).map_err(|e| ConversionError::Shape(e.to_string()))?;

    Ok(convert_journey_plan(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>{body}</soap:Body></soap:Envelope>"#
        )
    }

    #[test]
    fn parses_journeys_and_strips_markup() {
        let xml = envelope(
            r#"<ns2:RealtimeJourneyPlanResponse xmlns:ns2="http://www.thalesgroup.com/ojp/jpdlr" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                <ns2:outwardJourney xsi:type="ns2:RealtimeJourney">
                    <ns2:timetable><ns2:scheduled><ns2:departure>2024-03-15T08:05:00</ns2:departure></ns2:scheduled></ns2:timetable>
                    <ns2:fare><ns2:totalPrice>1250</ns2:totalPrice><ns2:fareClass>STANDARD</ns2:fareClass><ns2:description>Anytime Day Single</ns2:description></ns2:fare>
                    <ns2:serviceBulletins><ns2:cleared>false</ns2:cleared><ns2:description>Bus replacement</ns2:description></ns2:serviceBulletins>
                </ns2:outwardJourney>
            </ns2:RealtimeJourneyPlanResponse>"#,
        );

        let response = journey_response_from_xml(&xml).unwrap();

        assert_eq!(response.outward_journey.len(), 1);
        assert!(response.inward_journey.is_empty());
        let journey = &response.outward_journey[0];
        assert_eq!(journey.fare.len(), 1);
        assert_eq!(journey.fare[0].description, "Anytime Day Single");
        assert_eq!(journey.service_bulletins[0].description, "Bus replacement");
    }

    #[test]
    fn fault_is_service_error() {
        let xml = envelope(
            "<soap:Fault><faultcode>soap:Client</faultcode><faultstring>Invalid origin</faultstring></soap:Fault>",
        );

        match journey_response_from_xml(&xml) {
            Err(Error::Service(OjpError::Fault { code, message })) => {
                assert_eq!(code, "soap:Client");
                assert_eq!(message, "Invalid origin");
            }
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn fault_found_only_in_soap_envelopes() {
        let xml = envelope(
            "<soap:Fault><faultcode>soap:Server</faultcode><faultstring>Busy</faultstring></soap:Fault>",
        );
        assert!(matches!(fault_in(&xml), Some(OjpError::Fault { .. })));

        assert!(fault_in("<html><body><h1>Fault tolerance offline</h1></body></html>").is_none());
        assert!(fault_in("Fault: upstream timeout").is_none());
        assert!(fault_in(&envelope("<RealtimeJourneyPlanResponse/>")).is_none());
    }

    #[test]
    fn empty_response_has_no_journeys() {
        let xml = envelope("<RealtimeJourneyPlanResponse/>");
        assert_eq!(
            journey_response_from_xml(&xml).unwrap(),
            JourneyResponse::default()
        );
    }

    #[test]
    fn missing_payload_is_malformed() {
        let xml = envelope("<SomethingElse/>");
        assert!(matches!(
            journey_response_from_xml(&xml),
            Err(Error::MalformedResponse(ConversionError::MissingField(
                "RealtimeJourneyPlanResponse"
            )))
        ));
    }

    #[test]
    fn journey_without_timetable_is_malformed() {
        let xml = envelope(
            "<RealtimeJourneyPlanResponse><inwardJourney><fare/></inwardJourney></RealtimeJourneyPlanResponse>",
        );
        assert!(matches!(
            journey_response_from_xml(&xml),
            Err(Error::MalformedResponse(ConversionError::InJourney { .. }))
        ));
    }

    #[test]
    fn broken_xml_is_service_error() {
        assert!(matches!(
            journey_response_from_xml("<soap:Envelope><soap:Body>"),
            Err(Error::Service(OjpError::Xml { .. }))
        ));
    }
}
