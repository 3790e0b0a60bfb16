//! `RealtimeJourneyPlan` SOAP request envelope.

use chrono::NaiveDateTime;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::domain::JourneyRequest;

use super::error::OjpError;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const JPDLR_NS: &str = "http://www.thalesgroup.com/ojp/jpdlr";
const COMMON_NS: &str = "http://www.thalesgroup.com/ojp/common";

/// Realtime enquiry mode sent with every request.
const REALTIME_ENQUIRY: &str = "STANDARD";

fn format_depart_by(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Small helper over `Writer` so the envelope reads as nested elements.
struct Envelope {
    writer: Writer<Vec<u8>>,
}

impl Envelope {
    fn event(&mut self, event: Event<'_>) -> Result<(), OjpError> {
        self.writer
            .write_event(event)
            .map_err(|e| OjpError::Request(e.to_string()))
    }

    fn open(&mut self, name: &str) -> Result<(), OjpError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> Result<(), OjpError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn leaf(&mut self, name: &str, text: &str) -> Result<(), OjpError> {
        self.open(name)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(name)
    }
}

/// Serialize a journey request as a SOAP 1.1 envelope.
pub fn build_request(request: &JourneyRequest) -> Result<String, OjpError> {
    let mut env = Envelope {
        writer: Writer::new(Vec::new()),
    };

    env.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    env.event(Event::Start(
        BytesStart::new("soapenv:Envelope").with_attributes([
            ("xmlns:soapenv", SOAP_ENV_NS),
            ("xmlns:jp", JPDLR_NS),
            ("xmlns:com", COMMON_NS),
        ]),
    ))?;
    env.event(Event::Empty(BytesStart::new("soapenv:Header")))?;
    env.open("soapenv:Body")?;
    env.open("jp:RealtimeJourneyPlanRequest")?;

    env.open("jp:origin")?;
    env.leaf("com:stationCRS", request.origin.as_str())?;
    env.close("jp:origin")?;

    env.open("jp:destination")?;
    env.leaf("com:stationCRS", request.destination.as_str())?;
    env.close("jp:destination")?;

    env.leaf("jp:realtimeEnquiry", REALTIME_ENQUIRY)?;

    env.open("jp:outwardTime")?;
    env.leaf("jp:departBy", &format_depart_by(request.outward_depart_by))?;
    env.close("jp:outwardTime")?;

    env.open("jp:inwardTime")?;
    env.leaf("jp:departBy", &format_depart_by(request.inward_depart_by))?;
    env.close("jp:inwardTime")?;

    env.open("jp:fareRequestDetails")?;
    env.open("jp:passengers")?;
    env.leaf("com:adult", &request.passengers.adult.to_string())?;
    env.leaf("com:child", &request.passengers.child.to_string())?;
    env.close("jp:passengers")?;
    env.leaf("jp:fareClass", request.fare_class.as_str())?;
    env.close("jp:fareRequestDetails")?;

    env.leaf("jp:directTrains", &request.direct_trains.to_string())?;
    env.leaf(
        "jp:includeAdditionalInformation",
        &request.include_additional_information.to_string(),
    )?;

    env.close("jp:RealtimeJourneyPlanRequest")?;
    env.close("soapenv:Body")?;
    env.close("soapenv:Envelope")?;

    String::from_utf8(env.writer.into_inner()).map_err(|e| OjpError::Request(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Crs, FareClass, Passengers};
    use crate::ojp::xml;
    use chrono::{NaiveDate, NaiveTime};

    fn request() -> JourneyRequest {
        JourneyRequest::for_day(
            Crs::parse("ABD").unwrap(),
            Crs::parse("ARB").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
            FareClass::Standard,
        )
    }

    #[test]
    fn envelope_carries_request_fields() {
        let body = build_request(&request()).unwrap();
        assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));

        let tree = xml::to_value(&body).unwrap();
        let req = &tree["Envelope"]["Body"]["RealtimeJourneyPlanRequest"];

        assert_eq!(req["origin"]["stationCRS"], "ABD");
        assert_eq!(req["destination"]["stationCRS"], "ARB");
        assert_eq!(req["realtimeEnquiry"], "STANDARD");
        assert_eq!(req["outwardTime"]["departBy"], "2024-03-15T08:00:00");
        assert_eq!(req["inwardTime"]["departBy"], "2024-03-15T16:00:00");
        assert_eq!(req["fareRequestDetails"]["passengers"]["adult"], "1");
        assert_eq!(req["fareRequestDetails"]["passengers"]["child"], "0");
        assert_eq!(req["fareRequestDetails"]["fareClass"], "STANDARD");
        assert_eq!(req["directTrains"], "false");
        assert_eq!(req["includeAdditionalInformation"], "false");
    }

    #[test]
    fn envelope_reflects_overrides() {
        let request = request()
            .with_passengers(Passengers { adult: 2, child: 3 })
            .with_direct_trains(true);
        let tree = xml::to_value(&build_request(&request).unwrap()).unwrap();
        let req = &tree["Envelope"]["Body"]["RealtimeJourneyPlanRequest"];

        assert_eq!(req["fareRequestDetails"]["passengers"]["adult"], "2");
        assert_eq!(req["fareRequestDetails"]["passengers"]["child"], "3");
        assert_eq!(req["directTrains"], "true");
    }
}
