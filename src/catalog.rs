use crate::models::Component;

/// Static parts list served by the catalog endpoints. Seeded once at
/// startup and never mutated afterwards.
pub struct Catalog {
    components: Vec<Component>,
}

fn part(id: &str, name: &str, category: &str, description: &str) -> Component {
    Component {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            components: vec![
                part("arduino_uno", "Arduino Uno", "Microcontrollers", "Popular microcontroller board"),
                part("esp32", "ESP32", "Microcontrollers", "WiFi and Bluetooth enabled microcontroller"),
                part("led", "LED", "Display", "Light Emitting Diode"),
                part("servo_motor", "Servo Motor", "Actuators", "Precise position control motor"),
                part("ultrasonic_sensor", "Ultrasonic Sensor", "Sensors", "Distance measurement sensor"),
                part("temp_humidity", "Temperature & Humidity Sensor", "Sensors", "DHT22 sensor for environmental monitoring"),
                part("pir_sensor", "PIR Motion Sensor", "Sensors", "Passive infrared motion detector"),
                part("buzzer", "Buzzer", "Audio", "Sound generating component"),
                part("relay", "Relay Module", "Control", "Switch for controlling high power devices"),
                part("lcd_display", "LCD Display", "Display", "16x2 character display"),
            ],
        }
    }

    pub fn all(&self) -> &[Component] {
        &self.components
    }

    pub fn by_id(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    /// Case-insensitive category match, possibly empty.
    pub fn by_category(&self, category: &str) -> Vec<Component> {
        self.components
            .iter()
            .filter(|c| c.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
